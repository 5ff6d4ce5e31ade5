use super::*;

#[test]
fn interpret_is_the_default() {
    assert_eq!(EvalMode::default(), EvalMode::Interpret);
}

#[test]
fn depth_limits() {
    assert_eq!(EvalMode::Interpret.max_call_depth(), 10_000);
    assert_eq!(EvalMode::TestRun.max_call_depth(), 1_000);
}

#[test]
fn test_runs_capture_output() {
    let handler = EvalMode::TestRun.default_print_handler();
    handler.println("captured");
    assert_eq!(handler.get_output(), "captured\n");

    assert!(!EvalMode::Interpret.captures_output());
}
