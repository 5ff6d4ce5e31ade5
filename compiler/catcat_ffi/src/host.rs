//! In-process foreign functions.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::function::CallTarget;
use crate::{ForeignArg, ForeignError, ForeignFunction, ForeignResolver, Signature};

/// Rust implementation of a foreign symbol.
///
/// Receives arguments already checked against the declared signature.
pub type HostFn = dyn Fn(&[ForeignArg]) -> i64;

/// Resolves foreign declarations against functions registered in-process.
///
/// Modules are plain namespaces here: `ffi@double : "math" int int ;`
/// looks up `double` in the module registered as `math`.
#[derive(Default)]
pub struct HostResolver {
    modules: FxHashMap<String, FxHashMap<String, Rc<HostFn>>>,
}

impl HostResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` as `module`'s `symbol`, replacing any earlier entry.
    pub fn register(
        &mut self,
        module: impl Into<String>,
        symbol: impl Into<String>,
        f: impl Fn(&[ForeignArg]) -> i64 + 'static,
    ) {
        self.modules
            .entry(module.into())
            .or_default()
            .insert(symbol.into(), Rc::new(f));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_function(
        mut self,
        module: impl Into<String>,
        symbol: impl Into<String>,
        f: impl Fn(&[ForeignArg]) -> i64 + 'static,
    ) -> Self {
        self.register(module, symbol, f);
        self
    }
}

impl ForeignResolver for HostResolver {
    fn resolve(
        &self,
        module: &str,
        symbol: &str,
        signature: Signature,
    ) -> Result<ForeignFunction, ForeignError> {
        let symbols = self
            .modules
            .get(module)
            .ok_or_else(|| ForeignError::UnknownModule {
                module: module.to_string(),
            })?;
        let f = symbols
            .get(symbol)
            .ok_or_else(|| ForeignError::SymbolNotFound {
                module: module.to_string(),
                symbol: symbol.to_string(),
            })?;
        tracing::debug!(module, symbol, %signature, "resolved host function");
        Ok(ForeignFunction::new(
            symbol,
            module,
            signature,
            CallTarget::Host(Rc::clone(f)),
        ))
    }
}
