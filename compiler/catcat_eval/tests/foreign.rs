//! Foreign definitions declared the way a front-end would hand them over.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

mod common;

use std::cell::Cell;
use std::rc::Rc;

use catcat_eval::{EvalErrorKind, LoadError, Program};
use catcat_ffi::{ForeignArg, ForeignDecl, ForeignError, HostResolver};
use catcat_ir::Function;
use common::{interpreter, ints, words};
use pretty_assertions::assert_eq;

fn load(decls: &[&str], main: &str, resolver: &HostResolver) -> Result<Program, LoadError> {
    let mut builder = Program::builder();
    for decl in decls {
        let decl = ForeignDecl::parse(decl)?;
        builder.declare_foreign(&decl, resolver)?;
    }
    builder.define(Function::with_body("main", words(main)));
    builder.build()
}

fn square_resolver(calls: &Rc<Cell<usize>>) -> HostResolver {
    let calls = Rc::clone(calls);
    HostResolver::new().with_function("libdemo", "square", move |args: &[ForeignArg]| {
        calls.set(calls.get().saturating_add(1));
        match args {
            [ForeignArg::Int(n)] => n.saturating_mul(*n),
            _ => 0,
        }
    })
}

#[test]
fn single_integer_call() {
    let calls = Rc::new(Cell::new(0));
    let program = load(
        &["ffi@square : \"libdemo\" int int ;"],
        "7 square print",
        &square_resolver(&calls),
    )
    .unwrap();

    let mut interp = interpreter();
    interp.run(&program).unwrap();
    assert_eq!(interp.output(), "49\n");
    assert_eq!(calls.get(), 1);
}

#[test]
fn empty_stack_reports_underflow_without_calling() {
    let calls = Rc::new(Cell::new(0));
    let program = load(
        &["ffi@square : \"libdemo\" int int ;"],
        "square",
        &square_resolver(&calls),
    )
    .unwrap();

    let mut interp = interpreter();
    let err = interp.run(&program).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::StackUnderflow {
            needed: 1,
            available: 0
        }
    );
    assert_eq!(err.word.as_deref(), Some("square"));
    assert_eq!(calls.get(), 0);
}

#[test]
fn foreign_words_inside_blocks() {
    let calls = Rc::new(Cell::new(0));
    let program = load(
        &["sq ffi@square : \"libdemo\" int int ;"],
        "2 3 [ sq ] times",
        &square_resolver(&calls),
    )
    .unwrap();

    let mut interp = interpreter();
    interp.run(&program).unwrap();
    assert_eq!(ints(interp.stack()), vec![256]);
    assert_eq!(calls.get(), 3);
}

#[test]
fn unknown_type_identifiers_fail_to_load() {
    let calls = Rc::new(Cell::new(0));
    let err = load(
        &["ffi@square : \"libdemo\" int double ;"],
        "",
        &square_resolver(&calls),
    )
    .unwrap_err();
    assert_eq!(
        err,
        LoadError::Foreign(ForeignError::UnknownType {
            name: "double".into()
        })
    );
}

#[test]
fn unknown_modules_fail_to_load() {
    let calls = Rc::new(Cell::new(0));
    let err = load(
        &["ffi@square : \"libother\" int int ;"],
        "",
        &square_resolver(&calls),
    )
    .unwrap_err();
    assert_eq!(
        err,
        LoadError::Foreign(ForeignError::UnknownModule {
            module: "libother".into()
        })
    );
}

#[cfg(all(feature = "dylib", target_os = "linux", target_pointer_width = "64"))]
mod libc {
    use catcat_eval::Program;
    use catcat_ffi::{DylibResolver, ForeignDecl};
    use catcat_ir::Function;
    use pretty_assertions::assert_eq;

    use super::common::{interpreter, ints, words};

    #[test]
    fn abs_and_strlen_from_libc() {
        let resolver = DylibResolver::new();
        let mut builder = Program::builder();
        for decl in [
            "ffi@abs : \"libc.so.6\" int int ;",
            "ffi@strlen : \"libc.so.6\" int pointer ;",
        ] {
            builder
                .declare_foreign(&ForeignDecl::parse(decl).unwrap(), &resolver)
                .unwrap();
        }
        builder.define(Function::with_body(
            "main",
            words("-12 abs \"catcat\" strlen"),
        ));
        let program = builder.build().unwrap();

        let mut interp = interpreter();
        interp.run(&program).unwrap();
        assert_eq!(ints(interp.stack()), vec![12, 6]);
    }
}
