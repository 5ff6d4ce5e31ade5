#![deny(clippy::arithmetic_side_effects)]
//! catcat Eval - the stack machine for catcat programs.
//!
//! # Architecture
//!
//! - [`Program`]: the validated global table, built by [`ProgramBuilder`]
//! - [`Interpreter`]: owns one run's operand [`Stack`], call stack and
//!   print handler
//! - [`Environment`]: borrowed view of that state plus the function being
//!   executed; [`Environment::dispatch`] runs one word and
//!   [`Environment::call`] is the single path for nested execution
//! - builtins: the combinator set (`+ * equal? . dup swap rot apply bi
//!   times compose curry print prints`)
//! - foreign words call through `catcat_ffi`
//!
//! ```ignore
//! let mut program = Program::builder();
//! program.define(Function::with_body("main", [Word::int(1), Word::builtin(Builtin::Print)]));
//! let program = program.build()?;
//! Interpreter::new().run(&program)?;
//! ```

mod builtins;
pub mod diagnostics;
mod environment;
pub mod errors;
mod eval_mode;
mod foreign;
pub mod interpreter;
mod print_handler;
mod program;
mod stack;
#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod test_helpers;

use std::sync::Once;

pub use errors::{EvalBacktrace, EvalError, EvalErrorKind, EvalResult, LoadError};

pub use diagnostics::{CallFrame, CallStack};
pub use environment::Environment;
pub use eval_mode::EvalMode;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use program::{Callee, Definition, Program, ProgramBuilder, ENTRY_NAME};
pub use stack::{Stack, DEFAULT_STACK_CAPACITY};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber once per process.
///
/// Does nothing unless `RUST_LOG` is set. Nested calls render as an
/// indented tree:
///
/// ```text
/// RUST_LOG=catcat_eval=debug
/// RUST_LOG=catcat_eval=trace   # every dispatched word
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init();
        }
    });
}
