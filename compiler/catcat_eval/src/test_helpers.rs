//! Shared helpers for unit tests.
//!
//! `tests/common/mod.rs` carries the same helpers for integration tests.

use catcat_ir::{Builtin, Function, Value, Word};

use crate::errors::EvalResult;
use crate::{EvalMode, Interpreter, Program, Stack};

/// Build words from whitespace-separated tokens: integers, `"text"`
/// (no spaces), `[ ... ]` blocks, builtin names, and anything else as a
/// call by name.
pub(crate) fn words(source: &str) -> Vec<Word> {
    let mut open: Vec<Vec<Word>> = vec![Vec::new()];
    for token in source.split_whitespace() {
        let word = match token {
            "[" => {
                open.push(Vec::new());
                continue;
            }
            "]" => Word::block(open.pop().unwrap()),
            _ => token_word(token),
        };
        open.last_mut().unwrap().push(word);
    }
    assert_eq!(open.len(), 1, "unbalanced brackets in {source:?}");
    open.pop().unwrap()
}

fn token_word(token: &str) -> Word {
    if let Ok(n) = token.parse::<i64>() {
        Word::int(n)
    } else if let Some(text) = token.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Word::text(text)
    } else if let Some(builtin) = Builtin::from_name(token) {
        Word::builtin(builtin)
    } else {
        Word::call(token)
    }
}

/// A program from `(name, body)` pairs.
pub(crate) fn program(definitions: &[(&str, &str)]) -> Program {
    let mut builder = Program::builder();
    for (name, body) in definitions {
        builder.define(Function::with_body(*name, words(body)));
    }
    builder.build().unwrap()
}

pub(crate) fn test_interpreter() -> Interpreter {
    Interpreter::builder().mode(EvalMode::TestRun).build()
}

/// Load and run `definitions`, returning the interpreter for inspection.
pub(crate) fn run(definitions: &[(&str, &str)]) -> (Interpreter, EvalResult) {
    let program = program(definitions);
    let mut interpreter = test_interpreter();
    let result = interpreter.run(&program);
    (interpreter, result)
}

/// Run a program consisting of `main` only.
pub(crate) fn run_main(body: &str) -> (Interpreter, EvalResult) {
    run(&[("main", body)])
}

/// The stack's integers, bottom to top. Panics on non-integers.
pub(crate) fn ints(stack: &Stack) -> Vec<i64> {
    stack
        .iter()
        .map(|word| word.as_value().and_then(Value::as_integer).unwrap())
        .collect()
}
