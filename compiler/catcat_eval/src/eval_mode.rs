//! Evaluation modes.

use crate::print_handler::{buffer_handler, stdout_handler, SharedPrintHandler};

/// Evaluation mode, determining output routing and call-depth limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Standard mode: prints to stdout.
    #[default]
    Interpret,
    /// Test execution: captures output, tighter recursion bound.
    TestRun,
}

impl EvalMode {
    /// Maximum nesting of calls before `CallDepthExceeded`.
    ///
    /// - `Interpret`: 10 000 (the host stack grows on demand)
    /// - `TestRun`: 1 000
    #[inline]
    pub fn max_call_depth(self) -> usize {
        match self {
            Self::Interpret => 10_000,
            Self::TestRun => 1_000,
        }
    }

    /// Whether output is captured rather than written to stdout.
    #[inline]
    pub fn captures_output(self) -> bool {
        matches!(self, Self::TestRun)
    }

    /// Print handler used when the builder is not given one.
    pub fn default_print_handler(self) -> SharedPrintHandler {
        if self.captures_output() {
            buffer_handler()
        } else {
            stdout_handler()
        }
    }
}

#[cfg(test)]
mod tests;
