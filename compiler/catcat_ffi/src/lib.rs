//! Foreign-call bridge for the catcat runtime.
//!
//! A foreign definition names a native symbol in a module together with a
//! small C signature:
//!
//! ```text
//! ffi@abs : "libc.so.6" int int ;
//! ```
//!
//! The declaration is parsed ([`ForeignDecl`]) and resolved once, at program
//! load time, through a [`ForeignResolver`]. The result is a reusable
//! [`ForeignFunction`] that the evaluator invokes every time the word runs.
//!
//! # Resolvers
//!
//! - [`HostResolver`]: in-process Rust closures keyed by module and symbol.
//!   Platform independent; used for embedding and tests.
//! - `DylibResolver` (feature `dylib`, 64-bit targets): loads shared libraries
//!   with `libloading` and calls symbols through the C ABI.
//!
//! The rest of the runtime only sees [`ForeignFunction::call`], so the
//! evaluator stays platform independent.

mod decl;
mod error;
mod function;
mod host;
#[cfg(all(feature = "dylib", target_pointer_width = "64"))]
mod native;
mod types;

pub use decl::{ForeignDecl, FFI_PREFIX};
pub use error::ForeignError;
pub use function::{ForeignArg, ForeignFunction};
pub use host::{HostFn, HostResolver};
#[cfg(all(feature = "dylib", target_pointer_width = "64"))]
pub use native::DylibResolver;
pub use types::{ForeignType, Signature, MAX_ARGS};

/// Turns a module/symbol pair into a callable [`ForeignFunction`].
///
/// Resolution happens once per definition. Failing to find the module or
/// the symbol is a load-time error.
pub trait ForeignResolver {
    fn resolve(
        &self,
        module: &str,
        symbol: &str,
        signature: Signature,
    ) -> Result<ForeignFunction, ForeignError>;
}
