//! Built-in words.
//!
//! The IR only names builtins; their behavior lives in the evaluator,
//! which dispatches on this enum directly.

use std::fmt;

/// A word implemented by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `+` ( a b -- a+b )
    Add,
    /// `*` ( a b -- a*b )
    Mul,
    /// `equal?` ( a b -- 0|1 )
    Equal,
    /// `.` ( a -- )
    Drop,
    /// `dup` ( a -- a a )
    Dup,
    /// `swap` ( a b -- b a )
    Swap,
    /// `rot` ( a b c -- b c a )
    Rot,
    /// `apply` ( [q] -- ... )
    Apply,
    /// `bi` ( x [p] [q] -- p(x) q(x) )
    Bi,
    /// `times` ( n [q] -- ... )
    Times,
    /// `compose` ( [p] [q] -- [p q] )
    Compose,
    /// `curry` ( x [q] -- [x q] )
    Curry,
    /// `print` ( a -- )
    Print,
    /// `prints` ( -- )
    Prints,
}

impl Builtin {
    /// Every builtin, in lookup order.
    pub const ALL: [Builtin; 14] = [
        Self::Apply,
        Self::Print,
        Self::Prints,
        Self::Dup,
        Self::Swap,
        Self::Rot,
        Self::Bi,
        Self::Times,
        Self::Add,
        Self::Mul,
        Self::Drop,
        Self::Compose,
        Self::Curry,
        Self::Equal,
    ];

    /// The word as written in source.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Mul => "*",
            Self::Equal => "equal?",
            Self::Drop => ".",
            Self::Dup => "dup",
            Self::Swap => "swap",
            Self::Rot => "rot",
            Self::Apply => "apply",
            Self::Bi => "bi",
            Self::Times => "times",
            Self::Compose => "compose",
            Self::Curry => "curry",
            Self::Print => "print",
            Self::Prints => "prints",
        }
    }

    /// Look a builtin up by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    /// Number of stack operands consumed.
    pub const fn arity(self) -> usize {
        match self {
            Self::Prints => 0,
            Self::Drop | Self::Dup | Self::Apply | Self::Print => 1,
            Self::Add
            | Self::Mul
            | Self::Equal
            | Self::Swap
            | Self::Times
            | Self::Compose
            | Self::Curry => 2,
            Self::Rot | Self::Bi => 3,
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
