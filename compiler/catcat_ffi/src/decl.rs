//! Foreign definitions as written in a program.
//!
//! ```text
//! [alias] ffi@<symbol> : "<module>" <return-type> <arg-type>* ;
//! ```
//!
//! The definition is named after the alias when one is given, otherwise
//! after the symbol itself.

use std::str::FromStr;

use crate::error::malformed;
use crate::{ForeignError, ForeignFunction, ForeignResolver, ForeignType, Signature};

/// Marks a definition head as foreign.
pub const FFI_PREFIX: &str = "ffi@";

/// Split on whitespace, keeping a `"..."` literal as one token.
fn tokenize(source: &str) -> Result<Vec<&str>, ForeignError> {
    let mut tokens = Vec::new();
    let mut rest = source.trim_start();
    while !rest.is_empty() {
        let end = match rest.strip_prefix('"') {
            Some(body) => {
                let close = body
                    .find('"')
                    .ok_or_else(|| malformed(format!("unterminated module literal `{rest}`")))?;
                close + 2
            }
            None => rest.find(char::is_whitespace).unwrap_or(rest.len()),
        };
        let (token, tail) = rest.split_at(end);
        tokens.push(token);
        rest = tail.trim_start();
    }
    Ok(tokens)
}

/// A parsed, not yet resolved, foreign definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignDecl {
    name: String,
    symbol: String,
    module: String,
    signature: Signature,
}

impl ForeignDecl {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        module: impl Into<String>,
        signature: Signature,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            module: module.into(),
            signature,
        }
    }

    /// Parse one whitespace-separated declaration.
    ///
    /// The module literal is double-quoted and may contain spaces.
    pub fn parse(source: &str) -> Result<Self, ForeignError> {
        let mut tokens = tokenize(source)?.into_iter();

        let first = tokens
            .next()
            .ok_or_else(|| malformed("empty declaration"))?;
        let (alias, head) = if first.starts_with(FFI_PREFIX) {
            (None, first)
        } else {
            let head = tokens
                .next()
                .ok_or_else(|| malformed(format!("expected `{FFI_PREFIX}<symbol>` after `{first}`")))?;
            (Some(first), head)
        };
        let symbol = head
            .strip_prefix(FFI_PREFIX)
            .filter(|symbol| !symbol.is_empty())
            .ok_or_else(|| malformed(format!("expected `{FFI_PREFIX}<symbol>`, found `{head}`")))?;

        match tokens.next() {
            Some(":") => {}
            Some(other) => return Err(malformed(format!("expected `:`, found `{other}`"))),
            None => return Err(malformed("expected `:` after the symbol")),
        }

        let module_token = tokens
            .next()
            .ok_or_else(|| malformed("expected a module literal"))?;
        let module = module_token
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .filter(|module| !module.is_empty())
            .ok_or_else(|| malformed(format!("expected a quoted module name, found `{module_token}`")))?;

        let ret = match tokens.next() {
            Some(";") | None => return Err(malformed("missing return type")),
            Some(ret) => ret.parse::<ForeignType>()?,
        };

        let mut args = Vec::new();
        let mut terminated = false;
        for token in tokens.by_ref() {
            if token == ";" {
                terminated = true;
                break;
            }
            args.push(token.parse::<ForeignType>()?);
        }
        if !terminated {
            return Err(malformed("expected `;` at the end of the declaration"));
        }
        if let Some(extra) = tokens.next() {
            return Err(malformed(format!("unexpected `{extra}` after `;`")));
        }

        Ok(Self::new(
            alias.unwrap_or(symbol),
            symbol,
            module,
            Signature::new(ret, args)?,
        ))
    }

    /// Name of the global definition.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
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

    /// Resolve the symbol into a callable function.
    pub fn resolve(&self, resolver: &dyn ForeignResolver) -> Result<ForeignFunction, ForeignError> {
        resolver.resolve(&self.module, &self.symbol, self.signature.clone())
    }
}

impl FromStr for ForeignDecl {
    type Err = ForeignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
