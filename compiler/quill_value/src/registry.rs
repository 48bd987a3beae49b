//! Method dispatch registry.
//!
//! Maps a method name to a variadic native function. A string-keyed lookup
//! that is not satisfied by a field resolves here and yields a bound method:
//! a `Function` value that prepends the receiver to its arguments.
//!
//! The registry is an ordinary owned value. It is populated during startup
//! and then frozen behind a shared handle by the runtime, so mutation and
//! lookup never interleave.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{method_not_found, EvalResult};
use crate::value::{Callable, NativeFn, Value};

/// A registered method: receives `[receiver, a1, ..., an]`.
pub type MethodFn = Arc<NativeFn>;

#[derive(Clone, Default)]
pub struct MethodRegistry {
    methods: FxHashMap<String, MethodFn>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the method stored under `name`.
    pub fn register_method(
        &mut self,
        name: impl Into<String>,
        method: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) {
        self.register_shared(name, Arc::new(method));
    }

    /// Insert an already-shared method, e.g. one taken from another registry.
    pub fn register_shared(&mut self, name: impl Into<String>, method: MethodFn) {
        let name = name.into();
        let replaced = self.methods.insert(name.clone(), method).is_some();
        tracing::debug!(method = %name, replaced, "register_method");
    }

    pub fn lookup(&self, name: &str) -> Option<&MethodFn> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Merge another registry into this one. Entries in `other` win.
    pub fn merge(&mut self, other: MethodRegistry) {
        self.methods.extend(other.methods);
    }

    /// Produce a bound method for `receiver`.
    ///
    /// The receiver is copied into the returned function, so later changes
    /// to the original value are not observed by the bound method.
    ///
    /// # Errors
    ///
    /// `MethodNotFound` when `name` is not registered.
    #[tracing::instrument(level = "trace", skip(self, receiver), fields(kind = %receiver.kind()))]
    pub fn bind(&self, receiver: &Value, name: &str) -> EvalResult {
        let method = self
            .lookup(name)
            .ok_or_else(|| method_not_found(name, receiver.kind()))?;
        tracing::debug!(method = name, "bound method");
        Ok(Value::Function(Callable::bound(
            receiver.clone(),
            Arc::clone(method),
        )))
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.names())
            .finish()
    }
}
