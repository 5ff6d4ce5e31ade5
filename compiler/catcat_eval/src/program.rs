//! The global definition table.
//!
//! A [`Program`] is what the front-end hands the runtime: every top-level
//! definition, in source order, with unique names and a `main` entry.
//! It is validated once by [`ProgramBuilder::build`] and read-only after.

use std::rc::Rc;

use catcat_ffi::{ForeignDecl, ForeignFunction, ForeignResolver};
use catcat_ir::Function;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::LoadError;

/// Name of the entry definition.
pub const ENTRY_NAME: &str = "main";

/// One top-level definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Definition {
    Function(Function),
    Foreign {
        name: String,
        function: Rc<ForeignFunction>,
    },
}

impl Definition {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Function(function) if function.is_anonymous() => None,
            Self::Function(function) => Some(function.name()),
            Self::Foreign { name, .. } => Some(name),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Slot {
    Function(usize),
    Foreign(usize),
}

/// What a name resolves to at call time.
#[derive(Clone, Copy, Debug)]
pub enum Callee<'p> {
    Function(&'p Function),
    Foreign(&'p ForeignFunction),
}

/// A loaded program: the global table plus its entry point.
#[derive(Debug)]
pub struct Program {
    functions: Vec<Function>,
    foreign: Vec<Rc<ForeignFunction>>,
    index: FxHashMap<String, Slot>,
    entry: usize,
}

impl Program {
    pub fn builder() -> ProgramBuilder {
        ProgramBuilder::default()
    }

    /// The `main` function.
    pub fn entry(&self) -> &Function {
        &self.functions[self.entry]
    }

    /// Look a definition up by name.
    pub fn get(&self, name: &str) -> Option<Callee<'_>> {
        Some(match *self.index.get(name)? {
            Slot::Function(i) => Callee::Function(&self.functions[i]),
            Slot::Foreign(i) => Callee::Foreign(&self.foreign[i]),
        })
    }

    /// Look up a non-foreign definition by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        match self.get(name)? {
            Callee::Function(function) => Some(function),
            Callee::Foreign(_) => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of top-level definitions.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Collects definitions and validates them into a [`Program`].
#[derive(Default)]
pub struct ProgramBuilder {
    definitions: Vec<Definition>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named function.
    pub fn define(&mut self, function: Function) -> &mut Self {
        self.definitions.push(Definition::Function(function));
        self
    }

    /// Add an already-resolved foreign function under `name`.
    pub fn define_foreign(
        &mut self,
        name: impl Into<String>,
        function: ForeignFunction,
    ) -> &mut Self {
        self.definitions.push(Definition::Foreign {
            name: name.into(),
            function: Rc::new(function),
        });
        self
    }

    /// Resolve `decl` now and add it. Resolution failures abort the load.
    pub fn declare_foreign(
        &mut self,
        decl: &ForeignDecl,
        resolver: &dyn ForeignResolver,
    ) -> Result<&mut Self, LoadError> {
        let function = decl.resolve(resolver)?;
        debug!(name = decl.name(), symbol = decl.symbol(), module = decl.module(), "resolved foreign function");
        Ok(self.define_foreign(decl.name(), function))
    }

    /// Validate and freeze the table.
    ///
    /// Checks that every definition is named, names are unique, `main`
    /// exists and is not foreign, and every function reference (nested
    /// blocks included) names a definition.
    pub fn build(self) -> Result<Program, LoadError> {
        let mut index = FxHashMap::default();
        let mut functions = Vec::new();
        let mut foreign = Vec::new();
        for (position, definition) in self.definitions.into_iter().enumerate() {
            let name = definition
                .name()
                .ok_or(LoadError::AnonymousDefinition { position })?
                .to_string();
            let slot = match definition {
                Definition::Function(function) => {
                    functions.push(function);
                    Slot::Function(functions.len().saturating_sub(1))
                }
                Definition::Foreign { function, .. } => {
                    foreign.push(function);
                    Slot::Foreign(foreign.len().saturating_sub(1))
                }
            };
            if index.contains_key(&name) {
                return Err(LoadError::DuplicateDefinition { name });
            }
            index.insert(name, slot);
        }

        let entry = match index.get(ENTRY_NAME) {
            Some(Slot::Function(i)) => *i,
            Some(Slot::Foreign(_)) => return Err(LoadError::EntryIsForeign { entry: ENTRY_NAME }),
            None => return Err(LoadError::MissingEntry { entry: ENTRY_NAME }),
        };

        for function in &functions {
            if let Some(missing) = function
                .referenced_names()
                .into_iter()
                .find(|name| !index.contains_key(*name))
            {
                return Err(LoadError::UnresolvedReference {
                    function: function.name().to_string(),
                    name: missing.to_string(),
                });
            }
        }

        debug!(definitions = index.len(), "program loaded");
        Ok(Program {
            functions,
            foreign,
            index,
            entry,
        })
    }
}
