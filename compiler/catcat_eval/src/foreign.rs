//! Stack side of the foreign-call bridge.

use catcat_ffi::{ForeignArg, ForeignFunction};
use catcat_ir::{Value, Word};
use tracing::debug;

use crate::environment::Environment;
use crate::errors::{foreign_call_failed, type_mismatch, EvalResult};

fn to_arg(word: &Word) -> EvalResult<ForeignArg> {
    match word {
        Word::Value(Value::Integer(n)) => Ok(ForeignArg::Int(*n)),
        Word::Value(Value::Text(text)) => Ok(ForeignArg::Text(text.clone())),
        other => Err(type_mismatch("value", other.kind_name())),
    }
}

/// Call `function` with arguments taken from the stack.
///
/// Argument `i` is the `i`-th word popped (the topmost word is the first
/// argument). Arguments are converted and checked before the call and only
/// popped once it succeeds; the return value is pushed as an integer.
pub(crate) fn invoke(env: &mut Environment<'_>, function: &ForeignFunction) -> EvalResult {
    let arity = function.arity();
    let args = env
        .peek_operands(arity)?
        .map(to_arg)
        .collect::<EvalResult<Vec<_>>>()?;

    debug!(symbol = function.symbol(), module = function.module(), arity, "foreign call");
    let ret = function.call(&args).map_err(foreign_call_failed)?;

    env.pop_n(arity)?;
    env.push(Word::int(ret))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
