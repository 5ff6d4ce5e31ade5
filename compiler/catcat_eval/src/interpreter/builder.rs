//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::eval_mode::EvalMode;
use crate::print_handler::SharedPrintHandler;
use crate::stack::{Stack, DEFAULT_STACK_CAPACITY};

/// Builder for creating Interpreter instances with various configurations.
///
/// The default is `Interpret` mode: stdout output, a 256-word operand
/// stack and the mode's call-depth limit.
#[derive(Default)]
pub struct InterpreterBuilder {
    mode: EvalMode,
    stack_capacity: Option<usize>,
    max_call_depth: Option<usize>,
    print_handler: Option<SharedPrintHandler>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the evaluation mode.
    ///
    /// Controls the default output handler and call-depth limit.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Number of words the operand stack may hold.
    #[must_use]
    pub fn stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = Some(capacity);
        self
    }

    /// Override the mode's call-depth limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Set the print handler used by `print` and `prints`.
    ///
    /// Overrides the mode-based default.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter {
        let print_handler = self
            .print_handler
            .unwrap_or_else(|| self.mode.default_print_handler());
        let max_depth = self
            .max_call_depth
            .unwrap_or_else(|| self.mode.max_call_depth());

        Interpreter {
            mode: self.mode,
            stack: Stack::with_capacity(self.stack_capacity.unwrap_or(DEFAULT_STACK_CAPACITY)),
            call_stack: CallStack::new(Some(max_depth)),
            print_handler,
        }
    }
}
