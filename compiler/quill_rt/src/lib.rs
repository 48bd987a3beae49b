//! Quill RT - the runtime surface Quill-generated programs link against.
//!
//! [`quill_value`] defines what a value is and how operators behave. This
//! crate adds what a running program needs on top:
//! - Standard free functions ([`builtins`]): `type`, `len`, `null`, casts,
//!   `string`, `list`
//! - The built-in method library installed into the registry
//! - The [`Runtime`] context: frozen method registry, output channel,
//!   `print` and `exit`
//! - Runtime modes and tracing setup

pub mod builtins;
mod methods;
mod mode;
mod print_handler;
mod runtime;

use std::sync::Once;

pub use methods::register_builtin_methods;
pub use mode::{RuntimeMode, MODE_ENV_VAR};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, CaptureBuffer, PrintHandler,
    SharedPrintHandler,
};
pub use runtime::{Runtime, RuntimeBuilder, EXIT_FAILURE};

pub use quill_value::{EvalError, EvalResult, Value};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
