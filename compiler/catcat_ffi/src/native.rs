//! Shared-library symbols called through the C ABI.
//!
//! Every declared slot is an `int` or a pointer, and on the supported 64-bit
//! targets both travel in integer registers. A call therefore widens each
//! argument to a register-sized `isize` and goes through one of a fixed set
//! of `extern "C" fn(isize, ..) -> isize` shapes chosen by arity. An `int`
//! argument is sign-extended into its register and the callee reads the low
//! 32 bits, which is exactly what a C caller does.

#![allow(unsafe_code)]

use std::cell::RefCell;
use std::ffi::CString;
use std::rc::Rc;

use libloading::Library;
use rustc_hash::FxHashMap;

use crate::function::CallTarget;
use crate::{ForeignArg, ForeignError, ForeignFunction, ForeignResolver, Signature, MAX_ARGS};

/// A symbol address plus the library that keeps it mapped.
pub(crate) struct NativeSymbol {
    address: usize,
    _library: Rc<Library>,
}

impl NativeSymbol {
    /// Marshal checked arguments into register slots and call the symbol.
    ///
    /// Text arguments become `CString`s owned by this frame, so the pointers
    /// stay valid until the native call returns.
    pub(crate) fn call(&self, args: &[ForeignArg]) -> Result<i64, ForeignError> {
        let mut strings: Vec<CString> = Vec::new();
        let mut slots: Vec<isize> = Vec::with_capacity(args.len());
        for (index, arg) in args.iter().enumerate() {
            let slot = match arg {
                ForeignArg::Int(value) => isize::try_from(*value)
                    .map_err(|_| ForeignError::ArgumentOutOfRange {
                        index,
                        value: *value,
                    })?,
                ForeignArg::Text(text) => {
                    let c_string = CString::new(text.as_str())
                        .map_err(|_| ForeignError::InteriorNul { index })?;
                    let pointer = c_string.as_ptr() as isize;
                    strings.push(c_string);
                    pointer
                }
            };
            slots.push(slot);
        }

        // SAFETY: `address` was resolved from `_library`, which is still
        // loaded. The declared signature only contains register-class slots
        // and the slot count matches it (checked by `ForeignFunction::call`).
        // `strings` outlives the call.
        let raw = unsafe { invoke(self.address, &slots) }.ok_or(
            ForeignError::TooManyArguments {
                declared: slots.len(),
                max: MAX_ARGS,
            },
        )?;
        drop(strings);
        Ok(raw as i64)
    }
}

type Fn0 = unsafe extern "C" fn() -> isize;
type Fn1 = unsafe extern "C" fn(isize) -> isize;
type Fn2 = unsafe extern "C" fn(isize, isize) -> isize;
type Fn3 = unsafe extern "C" fn(isize, isize, isize) -> isize;
type Fn4 = unsafe extern "C" fn(isize, isize, isize, isize) -> isize;
type Fn5 = unsafe extern "C" fn(isize, isize, isize, isize, isize) -> isize;
type Fn6 = unsafe extern "C" fn(isize, isize, isize, isize, isize, isize) -> isize;

/// Call `address` with `slots` in argument registers.
///
/// Returns `None` for more than [`MAX_ARGS`] slots.
///
/// # Safety
///
/// `address` must point to a C function taking `slots.len()` register-class
/// arguments and returning an integer or pointer.
unsafe fn invoke(address: usize, slots: &[isize]) -> Option<isize> {
    let raw = match *slots {
        [] => std::mem::transmute::<usize, Fn0>(address)(),
        [a] => std::mem::transmute::<usize, Fn1>(address)(a),
        [a, b] => std::mem::transmute::<usize, Fn2>(address)(a, b),
        [a, b, c] => std::mem::transmute::<usize, Fn3>(address)(a, b, c),
        [a, b, c, d] => std::mem::transmute::<usize, Fn4>(address)(a, b, c, d),
        [a, b, c, d, e] => std::mem::transmute::<usize, Fn5>(address)(a, b, c, d, e),
        [a, b, c, d, e, f] => std::mem::transmute::<usize, Fn6>(address)(a, b, c, d, e, f),
        _ => return None,
    };
    Some(raw)
}

/// Resolves foreign declarations by loading shared libraries.
///
/// Each module is loaded once and shared by every symbol resolved from it.
#[derive(Default)]
pub struct DylibResolver {
    libraries: RefCell<FxHashMap<String, Rc<Library>>>,
}

impl DylibResolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&self, module: &str) -> Result<Rc<Library>, ForeignError> {
        if let Some(library) = self.libraries.borrow().get(module) {
            return Ok(Rc::clone(library));
        }
        // SAFETY: loading a library runs its initializers; the module name
        // comes from a foreign declaration the program author wrote.
        let library = unsafe { Library::new(module) }.map_err(|err| ForeignError::LibraryLoad {
            module: module.to_string(),
            message: err.to_string(),
        })?;
        let library = Rc::new(library);
        self.libraries
            .borrow_mut()
            .insert(module.to_string(), Rc::clone(&library));
        tracing::debug!(module, "loaded foreign module");
        Ok(library)
    }
}

impl ForeignResolver for DylibResolver {
    fn resolve(
        &self,
        module: &str,
        symbol: &str,
        signature: Signature,
    ) -> Result<ForeignFunction, ForeignError> {
        let library = self.load(module)?;
        // SAFETY: the symbol is only read as an address here; it is called
        // later through `invoke` with the declared signature.
        let address = unsafe { library.get::<Fn0>(symbol.as_bytes()) }
            .map(|f| *f as usize)
            .map_err(|_| ForeignError::SymbolNotFound {
                module: module.to_string(),
                symbol: symbol.to_string(),
            })?;
        tracing::debug!(module, symbol, %signature, "resolved native symbol");
        Ok(ForeignFunction::new(
            symbol,
            module,
            signature,
            CallTarget::Native(NativeSymbol {
                address,
                _library: library,
            }),
        ))
    }
}
