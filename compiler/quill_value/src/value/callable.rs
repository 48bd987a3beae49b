//! Callable payload for `Function` values.

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::errors::EvalResult;

/// Signature shared by every invocable: an ordered argument slice in, one value out.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult + Send + Sync;

/// Shared handle to an invocable.
///
/// Cloning a `Callable` shares the closure; captured state is immutable, so
/// sharing is indistinguishable from a deep copy.
#[derive(Clone)]
pub struct Callable(Arc<NativeFn>);

impl Callable {
    pub fn new(f: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static) -> Self {
        Callable(Arc::new(f))
    }

    /// Bind `receiver` as the first argument of `method`.
    ///
    /// Calling the result with `a1..an` invokes `method` with
    /// `[receiver, a1, ..., an]`. The receiver is captured by value.
    pub fn bound(receiver: Value, method: Arc<NativeFn>) -> Self {
        Callable::new(move |args: &[Value]| {
            let mut full = Vec::with_capacity(args.len() + 1);
            full.push(receiver.clone());
            full.extend_from_slice(args);
            method(&full)
        })
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.0)(args)
    }

    /// Identity comparison: both handles share the same closure.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<callable>")
    }
}
