//! Error types for loading and running programs.
//!
//! # Structured error categories
//!
//! `EvalErrorKind` carries the typed failure. Factory functions
//! (e.g. `stack_underflow()`) are the public way to build errors; the
//! dispatch loop then tags the error with the word that raised it and the
//! innermost call frame attaches a backtrace on the way out.

use std::fmt;

use catcat_ffi::ForeignError;

/// Result of running a word, a function, or a whole program.
pub type EvalResult<T = ()> = Result<T, EvalError>;

/// Typed runtime failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Operand stack
    #[error("stack underflow: needs {needed} operand{}, {available} available", plural(.needed))]
    StackUnderflow { needed: usize, available: usize },
    #[error("stack overflow: capacity of {capacity} words exceeded")]
    StackOverflow { capacity: usize },

    // Operand shapes
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    // Calls
    #[error("maximum call depth exceeded (limit: {limit})")]
    CallDepthExceeded { limit: usize },
    #[error("undefined function: {name}")]
    UndefinedFunction { name: String },

    // Foreign bridge
    #[error("foreign call failed: {0}")]
    ForeignCallFailed(ForeignError),
}

#[allow(clippy::trivially_copy_pass_by_ref, reason = "called with a field reference")]
fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name, or `[lambda]` for blocks.
    pub name: String,
}

/// Snapshot of the call stack at an error site, innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Frame names, innermost first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|frame| frame.name.as_str())
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {}", frame.name)?;
        }
        Ok(())
    }
}

/// Runtime error raised while executing a program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// The word that failed (builtin symbol, function name or value).
    pub word: Option<String>,
    /// Call chain at the point of failure.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            word: None,
            backtrace: None,
        }
    }

    /// Name the failing word. The innermost word wins.
    #[must_use]
    pub fn in_word(mut self, word: impl fmt::Display) -> Self {
        if self.word.is_none() {
            self.word = Some(word.to_string());
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.word {
            Some(word) => write!(f, "`{word}`: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            EvalErrorKind::ForeignCallFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::new(kind)
    }
}

// Factory functions

#[cold]
pub fn stack_underflow(needed: usize, available: usize) -> EvalError {
    EvalErrorKind::StackUnderflow { needed, available }.into()
}

#[cold]
pub fn stack_overflow(capacity: usize) -> EvalError {
    EvalErrorKind::StackOverflow { capacity }.into()
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    }
    .into()
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    }
    .into()
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalErrorKind::CallDepthExceeded { limit }.into()
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    }
    .into()
}

#[cold]
pub fn foreign_call_failed(err: ForeignError) -> EvalError {
    EvalErrorKind::ForeignCallFailed(err).into()
}

/// Error raised while assembling a [`Program`](crate::Program).
///
/// Nothing runs when loading fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("duplicate definition of `{name}`")]
    DuplicateDefinition { name: String },
    #[error("definition #{position} has no name")]
    AnonymousDefinition { position: usize },
    #[error("no `{entry}` definition")]
    MissingEntry { entry: &'static str },
    #[error("`{entry}` must be an ordinary function, not a foreign one")]
    EntryIsForeign { entry: &'static str },
    #[error("`{function}` refers to undefined function `{name}`")]
    UnresolvedReference { function: String, name: String },
    #[error(transparent)]
    Foreign(#[from] ForeignError),
}
