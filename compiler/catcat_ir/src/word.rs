//! Words and function references.

use std::fmt;
use std::rc::Rc;

use catcat_ffi::ForeignFunction;

use crate::{Builtin, Function, Value};

/// Something a word can call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionRef {
    Builtin(Builtin),
    /// A top-level definition, looked up by name in the global table.
    Defined(String),
    /// A foreign symbol resolved at load time.
    Foreign(Rc<ForeignFunction>),
}

impl FunctionRef {
    /// Name as rendered by `print`.
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(builtin) => builtin.name(),
            Self::Defined(name) => name,
            Self::Foreign(foreign) => foreign.symbol(),
        }
    }
}

/// One instruction or datum in a function body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Word {
    Value(Value),
    /// An anonymous function pushed as data.
    Block(Function),
    Function(FunctionRef),
}

impl Word {
    pub fn int(n: i64) -> Self {
        Self::Value(Value::Integer(n))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Value(Value::Text(text.into()))
    }

    pub fn block(words: impl IntoIterator<Item = Word>) -> Self {
        Self::Block(Function::block(words))
    }

    pub fn builtin(builtin: Builtin) -> Self {
        Self::Function(FunctionRef::Builtin(builtin))
    }

    /// A call to the top-level definition `name`.
    pub fn call(name: impl Into<String>) -> Self {
        Self::Function(FunctionRef::Defined(name.into()))
    }

    pub fn foreign(foreign: Rc<ForeignFunction>) -> Self {
        Self::Function(FunctionRef::Foreign(foreign))
    }

    /// Kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Value(value) => value.kind_name(),
            Self::Block(_) => "block",
            Self::Function(FunctionRef::Builtin(_)) => "builtin",
            Self::Function(FunctionRef::Defined(_)) => "function",
            Self::Function(FunctionRef::Foreign(_)) => "foreign function",
        }
    }

    #[inline]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Semantic equality used by `equal?`.
    ///
    /// Only values compare equal: same kind and same content. Blocks and
    /// function references are never equal to anything.
    pub fn is_equal(&self, other: &Word) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for Word {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Function> for Word {
    fn from(block: Function) -> Self {
        Self::Block(block)
    }
}

/// Print rendering: values as written, blocks as `[ w1 w2 ]`, function
/// references by name.
impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Block(block) => {
                f.write_str("[ ")?;
                for word in block.words() {
                    write!(f, "{word} ")?;
                }
                f.write_str("]")
            }
            Self::Function(function) => f.write_str(function.name()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
