//! The long-lived owner of a run's mutable state.

mod builder;

use catcat_ir::Function;
use tracing::{info, warn};

pub use builder::InterpreterBuilder;

use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::eval_mode::EvalMode;
use crate::print_handler::SharedPrintHandler;
use crate::program::Program;
use crate::stack::Stack;

/// Owns the operand stack, call stack and output handler, and hands
/// borrowed [`Environment`]s to each execution.
///
/// The operand stack persists across runs until [`reset`](Self::reset),
/// so an embedder can inspect it after a program returns or fails.
pub struct Interpreter {
    mode: EvalMode,
    stack: Stack,
    call_stack: CallStack,
    print_handler: SharedPrintHandler,
}

impl Interpreter {
    /// An `Interpret`-mode interpreter with default limits.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    #[inline]
    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    #[inline]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    #[inline]
    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Output captured so far; empty unless printing to a buffer.
    pub fn output(&self) -> String {
        self.print_handler.get_output()
    }

    /// Clear the operand stack, call frames and captured output.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.call_stack.clear();
        self.print_handler.clear();
    }

    /// Borrow the interpreter's state as an environment running `entry`.
    pub fn environment<'a>(
        &'a mut self,
        program: &'a Program,
        entry: &'a Function,
    ) -> Environment<'a> {
        Environment::new(
            program,
            &mut self.stack,
            &mut self.call_stack,
            &self.print_handler,
            entry,
        )
    }

    /// Run the program's `main`.
    pub fn run(&mut self, program: &Program) -> EvalResult {
        info!(mode = ?self.mode, definitions = program.len(), "run started");
        let result = self.execute(program, program.entry());
        match &result {
            Ok(()) => info!(stack = self.stack.len(), "run finished"),
            Err(err) => warn!(error = %err, "run aborted"),
        }
        result
    }

    /// Execute `function` as a call against this interpreter's stack, with
    /// `program` as the global table.
    pub fn execute(&mut self, program: &Program, function: &Function) -> EvalResult {
        self.environment(program, function).call(function)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
