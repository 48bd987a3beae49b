//! `RuntimeBuilder` for assembling a [`Runtime`].

use std::sync::Arc;

use quill_value::{EvalResult, MethodRegistry, Value};

use super::Runtime;
use crate::methods::register_builtin_methods;
use crate::mode::RuntimeMode;
use crate::print_handler::SharedPrintHandler;

/// Collects the mode, output channel and methods, then freezes them.
///
/// Methods registered here are layered over the built-in library, so a
/// program can replace `len` or `push` with its own definition.
pub struct RuntimeBuilder {
    mode: RuntimeMode,
    print_handler: Option<SharedPrintHandler>,
    builtin_methods: bool,
    methods: MethodRegistry,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            mode: RuntimeMode::default(),
            print_handler: None,
            builtin_methods: true,
            methods: MethodRegistry::new(),
        }
    }

    /// Start from the mode named by the environment.
    pub fn from_env() -> Self {
        Self::new().mode(RuntimeMode::from_env())
    }

    #[must_use]
    pub fn mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use `handler` instead of the mode's default channel.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn with_builtin_methods(mut self, enabled: bool) -> Self {
        self.builtin_methods = enabled;
        self
    }

    #[must_use]
    pub fn register_method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.methods.register_method(name, method);
        self
    }

    pub fn build(self) -> Runtime {
        let mut methods = MethodRegistry::new();
        if self.builtin_methods {
            register_builtin_methods(&mut methods);
        }
        methods.merge(self.methods);

        let output = self
            .print_handler
            .unwrap_or_else(|| self.mode.default_handler());
        tracing::debug!(mode = ?self.mode, methods = methods.len(), "runtime built");

        Runtime {
            methods: Arc::new(methods),
            output,
            mode: self.mode,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
