//! Runtime context handed to generated code.
//!
//! A [`Runtime`] owns the frozen method registry, the output channel and the
//! mode. Generated code routes string-keyed access, method calls, `print`
//! and `exit` through it; everything else is plain [`Value`] operations.
//! Cloning a runtime is cheap and shares the registry and output channel.

mod builder;

use std::sync::Arc;

use quill_value::{program_exit, EvalError, EvalResult, MethodRegistry, Value};

use crate::builtins::render_args;
use crate::mode::RuntimeMode;
use crate::print_handler::SharedPrintHandler;

pub use builder::RuntimeBuilder;

/// Exit status used by `exit`.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Clone)]
pub struct Runtime {
    methods: Arc<MethodRegistry>,
    output: SharedPrintHandler,
    mode: RuntimeMode,
}

impl Runtime {
    /// Native runtime with the built-in method library.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    #[inline]
    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    #[inline]
    pub fn methods(&self) -> &MethodRegistry {
        &self.methods
    }

    #[inline]
    pub fn output(&self) -> &SharedPrintHandler {
        &self.output
    }

    /// Read-only `receiver[key]`, resolving string keys against this
    /// runtime's registry.
    pub fn get(&self, receiver: &Value, key: &Value) -> EvalResult {
        receiver.get(key, &self.methods)
    }

    /// Read-only `receiver.name`.
    pub fn member(&self, receiver: &Value, name: &str) -> EvalResult {
        receiver.member(name, &self.methods)
    }

    /// `receiver.name(args...)`.
    #[tracing::instrument(level = "debug", skip(self, receiver, args))]
    pub fn call_method(&self, receiver: &Value, name: &str, args: &[Value]) -> EvalResult {
        self.member(receiver, name)?.call(args)
    }

    /// Render `args` space-separated on the standard channel.
    pub fn print(&self, args: &[Value]) -> Value {
        self.output.println(&render_args(args));
        Value::Null
    }

    /// Render `args` on the error channel and stop the program.
    ///
    /// In `Native` mode this terminates the process with
    /// [`EXIT_FAILURE`]. Other modes return a `ProgramExit` error that the
    /// caller propagates to unwind the generated program.
    pub fn exit(&self, args: &[Value]) -> EvalError {
        self.output.eprintln(&render_args(args));
        if self.mode.terminates_process() {
            tracing::debug!("exit: terminating process");
            std::process::exit(EXIT_FAILURE);
        }
        program_exit(EXIT_FAILURE)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("mode", &self.mode)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}
