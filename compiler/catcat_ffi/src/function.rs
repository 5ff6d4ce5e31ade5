//! Resolved foreign functions and argument marshaling.

use std::fmt;
use std::rc::Rc;

use crate::host::HostFn;
#[cfg(all(feature = "dylib", target_pointer_width = "64"))]
use crate::native::NativeSymbol;
use crate::{ForeignError, ForeignType, Signature};

/// A value handed to a foreign function, one per declared slot.
///
/// The evaluator converts popped stack values into these; the bridge checks
/// them against the signature before anything native runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForeignArg {
    Int(i64),
    Text(String),
}

impl ForeignArg {
    /// Kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Text(_) => "text",
        }
    }
}

/// Where a resolved symbol actually lives.
pub(crate) enum CallTarget {
    Host(Rc<HostFn>),
    #[cfg(all(feature = "dylib", target_pointer_width = "64"))]
    Native(NativeSymbol),
}

/// A foreign symbol resolved at load time, callable any number of times.
pub struct ForeignFunction {
    symbol: String,
    module: String,
    signature: Signature,
    target: CallTarget,
}

impl ForeignFunction {
    pub(crate) fn new(
        symbol: impl Into<String>,
        module: impl Into<String>,
        signature: Signature,
        target: CallTarget,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            module: module.into(),
            signature,
            target,
        }
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Number of arguments popped per call.
    #[inline]
    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    /// Check `args` against the signature and invoke the symbol.
    ///
    /// `args[i]` fills the i-th declared slot. An `int` return is
    /// sign-extended from 32 bits; a `pointer` return is the raw address.
    #[tracing::instrument(level = "debug", skip_all, fields(symbol = %self.symbol))]
    pub fn call(&self, args: &[ForeignArg]) -> Result<i64, ForeignError> {
        self.check_args(args)?;
        let raw = match &self.target {
            CallTarget::Host(f) => f(args),
            #[cfg(all(feature = "dylib", target_pointer_width = "64"))]
            CallTarget::Native(symbol) => symbol.call(args)?,
        };
        let result = normalize_return(self.signature.ret(), raw);
        tracing::debug!(result, "foreign call returned");
        Ok(result)
    }

    fn check_args(&self, args: &[ForeignArg]) -> Result<(), ForeignError> {
        if args.len() != self.arity() {
            return Err(ForeignError::ArityMismatch {
                expected: self.arity(),
                got: args.len(),
            });
        }
        for (index, (slot, arg)) in self.signature.args().iter().zip(args).enumerate() {
            match (slot, arg) {
                (ForeignType::Int, ForeignArg::Int(value)) => {
                    if i32::try_from(*value).is_err() {
                        return Err(ForeignError::ArgumentOutOfRange {
                            index,
                            value: *value,
                        });
                    }
                }
                (ForeignType::Pointer, ForeignArg::Text(text)) => {
                    if text.contains('\0') {
                        return Err(ForeignError::InteriorNul { index });
                    }
                }
                (expected, found) => {
                    return Err(ForeignError::ArgumentKind {
                        index,
                        expected: *expected,
                        found: found.kind_name(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A C `int` return only defines the low 32 bits of the register.
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation to C int is the declared return type"
)]
fn normalize_return(ret: ForeignType, raw: i64) -> i64 {
    match ret {
        ForeignType::Int => i64::from(raw as i32),
        ForeignType::Pointer => raw,
    }
}

impl fmt::Debug for ForeignFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignFunction")
            .field("symbol", &self.symbol)
            .field("module", &self.module)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ForeignFunction {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.module == other.module
            && self.signature == other.signature
    }
}

impl Eq for ForeignFunction {}
