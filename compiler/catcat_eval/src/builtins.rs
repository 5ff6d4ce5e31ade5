//! The combinator word set.
//!
//! Each builtin declares the shape of the operands it consumes. Shapes are
//! checked against the top of the stack before anything is popped, so a
//! word with missing or ill-typed operands leaves the stack as it found
//! it. Stack effects below are written bottom to top.

use catcat_ir::{Builtin, Function, Value, Word};

use crate::environment::Environment;
use crate::errors::{integer_overflow, type_mismatch, EvalError, EvalResult};

/// Required kind of one operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operand {
    Any,
    Integer,
    Block,
}

impl Operand {
    fn name(self) -> &'static str {
        match self {
            Self::Any => "any word",
            Self::Integer => "integer",
            Self::Block => "block",
        }
    }

    fn accepts(self, word: &Word) -> bool {
        match self {
            Self::Any => true,
            Self::Integer => matches!(word, Word::Value(Value::Integer(_))),
            Self::Block => matches!(word, Word::Block(_)),
        }
    }
}

/// Operand shapes, topmost first.
pub(crate) fn operands(builtin: Builtin) -> &'static [Operand] {
    use Operand::{Any, Block, Integer};
    match builtin {
        Builtin::Prints => &[],
        Builtin::Drop | Builtin::Dup | Builtin::Print => &[Any],
        Builtin::Apply => &[Block],
        Builtin::Add | Builtin::Mul => &[Integer, Integer],
        Builtin::Equal | Builtin::Swap => &[Any, Any],
        Builtin::Times => &[Block, Integer],
        Builtin::Compose => &[Block, Block],
        Builtin::Curry => &[Block, Any],
        Builtin::Rot => &[Any, Any, Any],
        Builtin::Bi => &[Block, Block, Any],
    }
}

fn check_operands(env: &Environment<'_>, shapes: &[Operand]) -> EvalResult {
    for (shape, word) in shapes.iter().zip(env.peek_operands(shapes.len())?) {
        if !shape.accepts(word) {
            return Err(type_mismatch(shape.name(), word.kind_name()));
        }
    }
    Ok(())
}

/// Run `builtin` against the environment's stack.
pub(crate) fn run(builtin: Builtin, env: &mut Environment<'_>) -> EvalResult {
    check_operands(env, operands(builtin))?;
    match builtin {
        Builtin::Add => arithmetic(env, "+", i64::checked_add),
        Builtin::Mul => arithmetic(env, "*", i64::checked_mul),
        Builtin::Equal => equal(env),
        Builtin::Drop => env.pop_operands::<1>().map(drop),
        Builtin::Dup => dup(env),
        Builtin::Swap => swap(env),
        Builtin::Rot => rot(env),
        Builtin::Apply => apply(env),
        Builtin::Bi => bi(env),
        Builtin::Times => times(env),
        Builtin::Compose => compose(env),
        Builtin::Curry => curry(env),
        Builtin::Print => print(env),
        Builtin::Prints => prints(env),
    }
}

fn into_integer(word: Word) -> Result<i64, EvalError> {
    match word {
        Word::Value(Value::Integer(n)) => Ok(n),
        other => Err(type_mismatch(Operand::Integer.name(), other.kind_name())),
    }
}

fn into_block(word: Word) -> Result<Function, EvalError> {
    match word {
        Word::Block(block) => Ok(block),
        other => Err(type_mismatch(Operand::Block.name(), other.kind_name())),
    }
}

/// ( x y -- x op y )
fn arithmetic(
    env: &mut Environment<'_>,
    operation: &str,
    op: fn(i64, i64) -> Option<i64>,
) -> EvalResult {
    let [y, x] = env.pop_operands()?;
    let (x, y) = (into_integer(x)?, into_integer(y)?);
    if let Some(result) = op(x, y) {
        return env.push(Word::int(result));
    }
    env.push(Word::int(x))?;
    env.push(Word::int(y))?;
    Err(integer_overflow(operation))
}

/// ( a b -- 1|0 )
fn equal(env: &mut Environment<'_>) -> EvalResult {
    let [b, a] = env.pop_operands()?;
    env.push(Word::Value(Value::from(a.is_equal(&b))))
}

/// ( a -- a a' )
fn dup(env: &mut Environment<'_>) -> EvalResult {
    let [a] = env.pop_operands()?;
    let copy = a.clone();
    env.push(a)?;
    env.push(copy)
}

/// ( a b -- b a )
fn swap(env: &mut Environment<'_>) -> EvalResult {
    let [b, a] = env.pop_operands()?;
    env.push(b)?;
    env.push(a)
}

/// ( a b c -- b c a )
fn rot(env: &mut Environment<'_>) -> EvalResult {
    let [c, b, a] = env.pop_operands()?;
    env.push(b)?;
    env.push(c)?;
    env.push(a)
}

/// ( [q] -- q() )
fn apply(env: &mut Environment<'_>) -> EvalResult {
    let [q] = env.pop_operands()?;
    env.call(&into_block(q)?)
}

/// ( x [p] [q] -- p(x) q(x') )
///
/// `p` runs first on `x`, then `q` on a deep clone of `x`.
fn bi(env: &mut Environment<'_>) -> EvalResult {
    let [q, p, x] = env.pop_operands()?;
    let (p, q) = (into_block(p)?, into_block(q)?);
    let copy = x.clone();
    env.push(x)?;
    env.call(&p)?;
    env.push(copy)?;
    env.call(&q)
}

/// ( n [q] -- q()^n )
///
/// Each iteration runs a fresh clone of `q`; `n <= 0` runs nothing.
fn times(env: &mut Environment<'_>) -> EvalResult {
    let [q, n] = env.pop_operands()?;
    let (n, q) = (into_integer(n)?, into_block(q)?);
    for _ in 0..n {
        let iteration = q.clone();
        env.call(&iteration)?;
    }
    Ok(())
}

/// ( [a] [b] -- [a b] )
fn compose(env: &mut Environment<'_>) -> EvalResult {
    let [b, a] = env.pop_operands()?;
    let mut composed = into_block(a)?;
    composed.extend(into_block(b)?.into_words());
    env.push(Word::Block(composed))
}

/// ( v [q] -- [v q] )
fn curry(env: &mut Environment<'_>) -> EvalResult {
    let [q, v] = env.pop_operands()?;
    let mut curried = into_block(q)?;
    curried.prepend(v);
    env.push(Word::Block(curried))
}

/// ( a -- )
fn print(env: &mut Environment<'_>) -> EvalResult {
    let [a] = env.pop_operands()?;
    env.output().println(&a.to_string());
    Ok(())
}

/// ( -- ), renders the whole stack.
fn prints(env: &mut Environment<'_>) -> EvalResult {
    env.output().println(&env.stack().to_string());
    Ok(())
}
