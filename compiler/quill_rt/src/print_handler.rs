//! Output channel for `print` and `exit`.
//!
//! Generated programs write to two channels: the standard one (`print`) and
//! the error one (`exit`). Where the text goes depends on the handler:
//! - `Stdout`: the process's stdout/stderr
//! - `Buffer`: in-memory capture, for tests and embedding
//! - `Silent`: discarded
//!
//! Enum dispatch keeps the hot `print` path free of vtable calls.

use std::sync::Arc;

use parking_lot::Mutex;

/// In-memory capture of both channels.
#[derive(Default)]
pub struct CaptureBuffer {
    out: Mutex<String>,
    err: Mutex<String>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_line(buf: &Mutex<String>, msg: &str) {
        let mut buf = buf.lock();
        buf.push_str(msg);
        buf.push('\n');
    }
}

pub enum PrintHandler {
    Stdout,
    Buffer(CaptureBuffer),
    Silent,
}

impl PrintHandler {
    /// Write a line to the standard channel.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout => println!("{msg}"),
            Self::Buffer(buf) => CaptureBuffer::push_line(&buf.out, msg),
            Self::Silent => {}
        }
    }

    /// Write a line to the error channel.
    pub fn eprintln(&self, msg: &str) {
        match self {
            Self::Stdout => eprintln!("{msg}"),
            Self::Buffer(buf) => CaptureBuffer::push_line(&buf.err, msg),
            Self::Silent => {}
        }
    }

    /// Captured standard output; empty unless buffering.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.out.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Captured error output; empty unless buffering.
    pub fn error_output(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.err.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buf) = self {
            buf.out.lock().clear();
            buf.err.lock().clear();
        }
    }
}

/// Handler shared between a runtime and whoever inspects its output.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(CaptureBuffer::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
