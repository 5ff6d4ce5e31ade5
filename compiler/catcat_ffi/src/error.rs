//! Errors raised while declaring, resolving or calling foreign functions.

use thiserror::Error;

use crate::ForeignType;

/// Failure in the foreign-call bridge.
///
/// The first group is raised at load time (declaration and resolution),
/// the second at call time (marshaling).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ForeignError {
    // Declaration
    #[error("unknown foreign type `{name}` (expected `int` or `pointer`)")]
    UnknownType { name: String },
    #[error("foreign functions take at most {max} arguments, {declared} declared")]
    TooManyArguments { declared: usize, max: usize },
    #[error("malformed foreign declaration: {reason}")]
    MalformedDeclaration { reason: String },

    // Resolution
    #[error("unknown foreign module `{module}`")]
    UnknownModule { module: String },
    #[error("cannot load foreign module `{module}`: {message}")]
    LibraryLoad { module: String, message: String },
    #[error("symbol `{symbol}` not found in `{module}`")]
    SymbolNotFound { module: String, symbol: String },

    // Marshaling
    #[error("expected {expected} arguments, got {got}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("argument {index} expects {expected}, found {found}")]
    ArgumentKind {
        index: usize,
        expected: ForeignType,
        found: &'static str,
    },
    #[error("argument {index} ({value}) does not fit a C int")]
    ArgumentOutOfRange { index: usize, value: i64 },
    #[error("argument {index} contains an interior NUL byte")]
    InteriorNul { index: usize },
}

#[cold]
pub(crate) fn malformed(reason: impl Into<String>) -> ForeignError {
    ForeignError::MalformedDeclaration {
        reason: reason.into(),
    }
}
