use pretty_assertions::assert_eq;

use super::*;
use crate::errors::{stack_underflow, EvalErrorKind};

#[test]
fn empty_stack() {
    let calls = CallStack::new(Some(100));
    assert!(calls.is_empty());
    assert_eq!(calls.depth(), 0);
    assert!(calls.capture().is_empty());
}

#[test]
fn depth_limit_enforced() {
    let mut calls = CallStack::new(Some(3));
    for _ in 0..3 {
        calls.push(CallFrame::new("recurse")).unwrap();
    }
    let err = calls.push(CallFrame::new("recurse")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::CallDepthExceeded { limit: 3 });
    assert_eq!(calls.depth(), 3);
}

#[test]
fn unlimited_depth() {
    let mut calls = CallStack::default();
    for _ in 0..1000 {
        calls.push(CallFrame::new("deep")).unwrap();
    }
    assert_eq!(calls.depth(), 1000);
}

#[test]
fn capture_is_most_recent_first() {
    let mut calls = CallStack::new(None);
    for name in ["main", "outer", "inner"] {
        calls.push(CallFrame::new(name)).unwrap();
    }
    let backtrace = calls.capture();
    assert_eq!(
        backtrace.names().collect::<Vec<_>>(),
        vec!["inner", "outer", "main"]
    );
    calls.pop();
    assert_eq!(calls.depth(), 2);
}

#[test]
fn attach_keeps_the_first_backtrace() {
    let mut calls = CallStack::new(None);
    calls.push(CallFrame::new("main")).unwrap();
    calls.push(CallFrame::new("inner")).unwrap();
    let err = calls.attach_backtrace(stack_underflow(1, 0));
    calls.pop();
    let err = calls.attach_backtrace(err);
    assert_eq!(err.backtrace.map(|bt| bt.len()), Some(2));
}

#[test]
fn no_backtrace_outside_any_call() {
    let calls = CallStack::new(None);
    let err = calls.attach_backtrace(stack_underflow(1, 0));
    assert!(err.backtrace.is_none());
}
