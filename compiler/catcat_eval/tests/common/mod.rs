//! Helpers shared by the integration tests.
//!
//! Mirrors `src/test_helpers.rs`; integration tests cannot see `cfg(test)` items.

#![allow(dead_code, reason = "each test binary uses a subset")]
#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use catcat_eval::{EvalMode, EvalResult, Interpreter, Program, Stack};
use catcat_ir::{Builtin, Function, Value, Word};

/// Build words from whitespace-separated tokens: integers, `"text"` (no
/// spaces), `[ ... ]` blocks, builtin names, and anything else as a call by
/// name.
pub fn words(source: &str) -> Vec<Word> {
    let mut open: Vec<Vec<Word>> = vec![Vec::new()];
    for token in source.split_whitespace() {
        let word = match token {
            "[" => {
                open.push(Vec::new());
                continue;
            }
            "]" => Word::block(open.pop().unwrap()),
            _ => {
                if let Ok(n) = token.parse::<i64>() {
                    Word::int(n)
                } else if let Some(text) =
                    token.strip_prefix('"').and_then(|t| t.strip_suffix('"'))
                {
                    Word::text(text)
                } else if let Some(builtin) = Builtin::from_name(token) {
                    Word::builtin(builtin)
                } else {
                    Word::call(token)
                }
            }
        };
        open.last_mut().unwrap().push(word);
    }
    assert_eq!(open.len(), 1, "unbalanced brackets in {source:?}");
    open.pop().unwrap()
}

pub fn program(definitions: &[(&str, &str)]) -> Program {
    let mut builder = Program::builder();
    for (name, body) in definitions {
        builder.define(Function::with_body(*name, words(body)));
    }
    builder.build().unwrap()
}

pub fn interpreter() -> Interpreter {
    Interpreter::builder().mode(EvalMode::TestRun).build()
}

/// Load and run `definitions`; returns the interpreter for inspection.
pub fn run(definitions: &[(&str, &str)]) -> (Interpreter, EvalResult) {
    let program = program(definitions);
    let mut interp = interpreter();
    let result = interp.run(&program);
    (interp, result)
}

pub fn run_main(body: &str) -> (Interpreter, EvalResult) {
    run(&[("main", body)])
}

/// Integers on the stack, bottom to top.
pub fn ints(stack: &Stack) -> Vec<i64> {
    stack
        .iter()
        .map(|word| word.as_value().and_then(Value::as_integer).unwrap())
        .collect()
}
