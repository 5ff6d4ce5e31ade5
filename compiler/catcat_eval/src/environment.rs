//! Execution context and the dispatch loop.
//!
//! An [`Environment`] is a cheap bundle of borrowed handles: the program's
//! global table, the run's single operand stack, the call stack used for
//! depth limits and backtraces, and the output handler, plus the function
//! currently being executed. Nested calls reborrow the same handles with a
//! different entry via [`Environment::child`], so every call operates on
//! the caller's operand stack and the host call stack is the only record
//! of where to return.

use catcat_ir::{Function, FunctionRef, Word};
use catcat_stack::{ensure_sufficient_stack, remaining_stack};
use tracing::{debug_span, trace};

use crate::builtins;
use crate::diagnostics::{CallFrame, CallStack};
use crate::errors::{stack_underflow, undefined_function, EvalResult};
use crate::foreign;
use crate::print_handler::PrintHandlerImpl;
use crate::program::{Callee, Program};
use crate::stack::Stack;

pub struct Environment<'run> {
    program: &'run Program,
    stack: &'run mut Stack,
    calls: &'run mut CallStack,
    output: &'run PrintHandlerImpl,
    entry: &'run Function,
}

impl<'run> Environment<'run> {
    pub fn new(
        program: &'run Program,
        stack: &'run mut Stack,
        calls: &'run mut CallStack,
        output: &'run PrintHandlerImpl,
        entry: &'run Function,
    ) -> Self {
        Self {
            program,
            stack,
            calls,
            output,
            entry,
        }
    }

    #[inline]
    pub fn entry(&self) -> &Function {
        self.entry
    }

    #[inline]
    pub fn program(&self) -> &Program {
        self.program
    }

    #[inline]
    pub fn stack(&self) -> &Stack {
        self.stack
    }

    #[inline]
    pub fn call_depth(&self) -> usize {
        self.calls.depth()
    }

    #[inline]
    pub(crate) fn output(&self) -> &PrintHandlerImpl {
        self.output
    }

    /// An environment sharing every handle with `self` but running `entry`.
    pub fn child<'c>(&'c mut self, entry: &'c Function) -> Environment<'c> {
        Environment {
            program: self.program,
            stack: &mut *self.stack,
            calls: &mut *self.calls,
            output: self.output,
            entry,
        }
    }

    /// Run the entry function's words left to right, stopping at the first
    /// error.
    pub fn execute(&mut self) -> EvalResult {
        let entry = self.entry;
        for word in entry.words() {
            self.dispatch(word)?;
        }
        Ok(())
    }

    /// Run a single word.
    ///
    /// Values and blocks are cloned onto the stack; the stored word is never
    /// handed out, so a definition always starts from its pristine form.
    pub fn dispatch(&mut self, word: &Word) -> EvalResult {
        trace!(%word, depth = self.calls.depth(), "dispatch");
        match word {
            Word::Value(_) | Word::Block(_) => {
                self.push(word.clone()).map_err(|err| err.in_word(word))
            }
            Word::Function(FunctionRef::Builtin(builtin)) => {
                builtins::run(*builtin, self).map_err(|err| err.in_word(builtin))
            }
            Word::Function(FunctionRef::Defined(name)) => {
                let program = self.program;
                match program.get(name) {
                    Some(Callee::Function(function)) => self.call(function),
                    Some(Callee::Foreign(function)) => foreign::invoke(self, function),
                    None => Err(undefined_function(name)),
                }
                .map_err(|err| err.in_word(name))
            }
            Word::Function(FunctionRef::Foreign(function)) => foreign::invoke(self, function)
                .map_err(|err| err.in_word(function.symbol())),
        }
    }

    /// Execute `function` as a nested call on the shared stack.
    ///
    /// Every nested execution goes through here: defined functions,
    /// `apply`, `bi` and `times`. The frame push enforces the depth limit;
    /// the innermost failing frame attaches the backtrace.
    pub fn call(&mut self, function: &Function) -> EvalResult {
        self.calls.push(CallFrame::new(function.name()))?;
        let span = debug_span!(
            "call",
            function = function.name(),
            depth = self.calls.depth(),
            stack_left = ?remaining_stack(),
        );
        let result = span.in_scope(|| ensure_sufficient_stack(|| self.child(function).execute()));
        let result = result.map_err(|err| self.calls.attach_backtrace(err));
        self.calls.pop();
        result
    }

    #[inline]
    pub(crate) fn push(&mut self, word: Word) -> EvalResult {
        self.stack.push(word)
    }

    /// The top `n` words, topmost first, or underflow.
    pub(crate) fn peek_operands(&self, n: usize) -> EvalResult<impl Iterator<Item = &Word>> {
        self.stack
            .peek_n(n)
            .map(|words| words.iter().rev())
            .ok_or_else(|| stack_underflow(n, self.stack.len()))
    }

    /// Pop `N` words, topmost first, or underflow with the stack untouched.
    pub(crate) fn pop_operands<const N: usize>(&mut self) -> EvalResult<[Word; N]> {
        let available = self.stack.len();
        self.stack
            .pop_array()
            .ok_or_else(|| stack_underflow(N, available))
    }

    /// Pop `n` words, topmost first, or underflow with the stack untouched.
    pub(crate) fn pop_n(&mut self, n: usize) -> EvalResult<Vec<Word>> {
        let available = self.stack.len();
        self.stack
            .pop_n(n)
            .ok_or_else(|| stack_underflow(n, available))
    }
}
