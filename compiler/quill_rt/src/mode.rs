//! Runtime modes.
//!
//! A mode decides where program output goes and what `exit` does. Policy is
//! read through methods rather than by matching on the variant at call sites.

use crate::print_handler::{buffer_handler, silent_handler, stdout_handler, SharedPrintHandler};

/// Environment variable read by [`RuntimeMode::from_env`].
pub const MODE_ENV_VAR: &str = "QUILL_RUNTIME_MODE";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RuntimeMode {
    /// Compiled program: stdout/stderr, and `exit` ends the process.
    #[default]
    Native,
    /// Output is buffered and `exit` returns an error instead of ending the
    /// process.
    Capture,
    /// Output is discarded; `exit` behaves as in `Capture`.
    Silent,
}

impl RuntimeMode {
    /// Whether `exit` terminates the host process.
    #[inline]
    pub fn terminates_process(self) -> bool {
        matches!(self, Self::Native)
    }

    /// Parse a mode name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        [Self::Native, Self::Capture, Self::Silent]
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }

    /// Mode named by `QUILL_RUNTIME_MODE`, or `Native` when unset or unknown.
    pub fn from_env() -> Self {
        let mode = std::env::var(MODE_ENV_VAR)
            .ok()
            .and_then(|name| Self::from_name(&name))
            .unwrap_or_default();
        tracing::debug!(?mode, "runtime mode from environment");
        mode
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Capture => "capture",
            Self::Silent => "silent",
        }
    }

    /// The output channel this mode uses when none is given explicitly.
    pub fn default_handler(self) -> SharedPrintHandler {
        match self {
            Self::Native => stdout_handler(),
            Self::Capture => buffer_handler(),
            Self::Silent => silent_handler(),
        }
    }
}
