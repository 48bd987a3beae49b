//! Stack growth for recursion over nested values.
//!
//! Lists may nest arbitrarily deep, and rendering, equality and cloning walk
//! them recursively. Those walks go through [`ensure_sufficient_stack`],
//! which grows the native stack with `stacker` when the remaining space drops
//! below a red zone. On `wasm32` the closure is called directly. Dropping
//! uses a worklist instead and never recurses.

/// Grow when less than this much stack remains (100KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhaustion.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
