use std::cell::Cell;
use std::rc::Rc;

use catcat_ffi::{ForeignArg, ForeignError, ForeignResolver, ForeignType, HostResolver, Signature};
use catcat_ir::{Function, Word};
use pretty_assertions::assert_eq;

use crate::errors::EvalErrorKind;
use crate::test_helpers::{ints, test_interpreter, words};
use crate::{Interpreter, Program};

/// A host module with `sub(a, b) = a - b`, `strlen(s)` and `answer()`,
/// counting every native invocation.
fn host(calls: &Rc<Cell<usize>>) -> HostResolver {
    let counted = |calls: &Rc<Cell<usize>>| {
        let calls = Rc::clone(calls);
        move || calls.set(calls.get().saturating_add(1))
    };
    let (c1, c2, c3) = (counted(calls), counted(calls), counted(calls));
    HostResolver::new()
        .with_function("host", "sub", move |args: &[ForeignArg]| {
            c1();
            match args {
                [ForeignArg::Int(a), ForeignArg::Int(b)] => a.wrapping_sub(*b),
                _ => 0,
            }
        })
        .with_function("host", "strlen", move |args: &[ForeignArg]| {
            c2();
            match args {
                [ForeignArg::Text(s)] => i64::try_from(s.len()).unwrap_or(-1),
                _ => -1,
            }
        })
        .with_function("host", "answer", move |_: &[ForeignArg]| {
            c3();
            42
        })
}

fn signature(ret: &str, args: &[&str]) -> Signature {
    Signature::parse(ret, args).unwrap()
}

/// Run `body` as `main` with `sub`, `strlen` and `answer` defined.
fn run(body: &str) -> (Interpreter, Result<(), crate::EvalError>, usize) {
    let calls = Rc::new(Cell::new(0));
    let resolver = host(&calls);
    let mut builder = Program::builder();
    builder
        .define_foreign(
            "sub",
            resolver.resolve("host", "sub", signature("int", &["int", "int"])).unwrap(),
        )
        .define_foreign(
            "strlen",
            resolver.resolve("host", "strlen", signature("int", &["pointer"])).unwrap(),
        )
        .define_foreign("answer", resolver.resolve("host", "answer", signature("int", &[])).unwrap())
        .define(Function::with_body("main", words(body)));
    let program = builder.build().unwrap();

    let mut interp = test_interpreter();
    let result = interp.run(&program);
    (interp, result, calls.get())
}

#[test]
fn pops_arguments_and_pushes_the_result() {
    let (interp, result, calls) = run("100 10 3 sub");
    result.unwrap();
    assert_eq!(calls, 1);
    // The topmost word is the first argument: sub(3, 10).
    assert_eq!(ints(interp.stack()), vec![100, -7]);
}

#[test]
fn text_goes_to_pointer_slots() {
    let (interp, result, _) = run("\"hello\" strlen");
    result.unwrap();
    assert_eq!(ints(interp.stack()), vec![5]);
}

#[test]
fn nullary_calls_pop_nothing() {
    let (interp, result, _) = run("1 answer");
    result.unwrap();
    assert_eq!(ints(interp.stack()), vec![1, 42]);
}

#[test]
fn underflow_skips_the_native_call() {
    let (interp, result, calls) = run("1 sub");
    let err = result.unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::StackUnderflow {
            needed: 2,
            available: 1
        }
    );
    assert_eq!(err.word.as_deref(), Some("sub"));
    assert_eq!(calls, 0);
    assert_eq!(ints(interp.stack()), vec![1]);
}

#[test]
fn blocks_are_not_arguments() {
    let (interp, result, calls) = run("1 [ 2 ] sub");
    assert_eq!(
        result.unwrap_err().kind,
        EvalErrorKind::TypeMismatch {
            expected: "value".into(),
            got: "block".into()
        }
    );
    assert_eq!(calls, 0);
    assert_eq!(interp.stack().len(), 2);
}

#[test]
fn slot_kinds_are_checked_before_calling() {
    let (interp, result, calls) = run("\"x\" strlen 7 strlen");
    let err = result.unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ForeignCallFailed(ForeignError::ArgumentKind {
            index: 0,
            expected: ForeignType::Pointer,
            found: "integer"
        })
    );
    assert_eq!(calls, 1);
    assert_eq!(ints(interp.stack()), vec![1, 7]);
}

#[test]
fn int_slots_must_fit_a_c_int() {
    let (_, result, calls) = run(&format!("1 {} sub", i64::from(i32::MAX).saturating_add(1)));
    assert!(matches!(
        result.unwrap_err().kind,
        EvalErrorKind::ForeignCallFailed(ForeignError::ArgumentOutOfRange { index: 0, .. })
    ));
    assert_eq!(calls, 0);
}

#[test]
fn resolved_words_can_be_embedded_directly() {
    let calls = Rc::new(Cell::new(0));
    let answer = host(&calls)
        .resolve("host", "answer", signature("int", &[]))
        .unwrap();
    let mut builder = Program::builder();
    builder.define(Function::with_body(
        "main",
        [Word::foreign(Rc::new(answer)), Word::int(0)],
    ));
    let program = builder.build().unwrap();

    let mut interp = test_interpreter();
    interp.run(&program).unwrap();
    assert_eq!(ints(interp.stack()), vec![42, 0]);
    assert_eq!(calls.get(), 1);
}
