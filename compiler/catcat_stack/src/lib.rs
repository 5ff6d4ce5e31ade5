//! Host-stack safety for the catcat dispatch engine.
//!
//! Calling a word is plain Rust recursion: `execute` recurses into
//! `execute` for every defined-function call and every block run by
//! `apply`, `bi` or `times`. Programs can nest far deeper than the 8MB
//! main-thread stack allows, so every nested execution is wrapped in
//! [`ensure_sufficient_stack`], which grows the host stack on demand.
//!
//! Growing the stack does not make runaway recursion legal. The
//! evaluator still enforces a call-depth limit and reports it as an
//! error; this crate only guarantees that the limit is reached before
//! the process runs out of native stack.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack when the red zone is hit.
//! - **WASM targets**: no-op passthrough (the engine manages its own stack).

/// Minimum stack space to keep available (128KB red zone).
///
/// One `execute` frame plus a builtin frame is well under this.
const RED_ZONE: usize = 128 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f` with at least [`RED_ZONE`] bytes of host stack available.
///
/// ```text
/// fn call(&mut self, function: &Function) -> EvalResult {
///     ensure_sufficient_stack(|| self.child(function).execute())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining host stack in bytes, when the platform can tell.
///
/// Recorded on every `call` span by the evaluator.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// WASM version - the remaining stack is unknown.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
