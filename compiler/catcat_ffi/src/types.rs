//! Native slot types and call signatures.

use std::fmt;
use std::str::FromStr;

use crate::ForeignError;

/// Maximum number of declared arguments.
///
/// Every slot is passed in an integer register on the supported targets.
pub const MAX_ARGS: usize = 6;

/// Type of a native argument or return slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForeignType {
    /// C `int` (32-bit signed).
    Int,
    /// Opaque pointer; text values are passed as NUL-terminated strings.
    Pointer,
}

impl ForeignType {
    /// The identifier used in declarations.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Pointer => "pointer",
        }
    }
}

impl FromStr for ForeignType {
    type Err = ForeignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "pointer" => Ok(Self::Pointer),
            _ => Err(ForeignError::UnknownType {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ForeignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Return type plus ordered argument types of a foreign function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    ret: ForeignType,
    args: Vec<ForeignType>,
}

impl Signature {
    /// Build a signature, rejecting more than [`MAX_ARGS`] arguments.
    pub fn new(
        ret: ForeignType,
        args: impl IntoIterator<Item = ForeignType>,
    ) -> Result<Self, ForeignError> {
        let args: Vec<ForeignType> = args.into_iter().collect();
        if args.len() > MAX_ARGS {
            return Err(ForeignError::TooManyArguments {
                declared: args.len(),
                max: MAX_ARGS,
            });
        }
        Ok(Self { ret, args })
    }

    /// Build a signature from type identifiers (`int`, `pointer`).
    pub fn parse(ret: &str, args: &[&str]) -> Result<Self, ForeignError> {
        let ret = ret.parse()?;
        let args = args
            .iter()
            .map(|arg| arg.parse())
            .collect::<Result<Vec<ForeignType>, _>>()?;
        Self::new(ret, args)
    }

    #[inline]
    pub fn ret(&self) -> ForeignType {
        self.ret
    }

    #[inline]
    pub fn args(&self) -> &[ForeignType] {
        &self.args
    }

    /// Number of values popped per call.
    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}
