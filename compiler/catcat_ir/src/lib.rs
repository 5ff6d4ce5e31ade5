//! catcat IR - the runtime's word graph.
//!
//! A program is a table of named [`Function`]s. A function is an ordered
//! list of [`Word`]s, and a word is exactly one of:
//!
//! - a [`Value`]: integer or text, pushed as-is;
//! - a block: an anonymous [`Function`] pushed as data and run later by
//!   combinators such as `apply` or `times`;
//! - a [`FunctionRef`]: a [`Builtin`], a defined function (by name), or a
//!   resolved foreign function.
//!
//! # Ownership
//!
//! Every word owns its payload. `Clone` is a deep copy of the word graph:
//! cloning a block clones its whole word list, so a copy pushed on the
//! stack can be rebuilt by `compose` or `curry` without touching the
//! definition it came from. Defined functions are referenced by name and
//! live only in the program's global table, which is read-only during a run.
//! Foreign descriptors are immutable and shared.

mod builtin;
mod function;
mod value;
mod word;

pub use builtin::Builtin;
pub use function::{Function, LAMBDA_NAME};
pub use value::Value;
pub use word::{FunctionRef, Word};

pub use catcat_ffi::ForeignFunction;
