//! Error types for runtime value operations.
//!
//! Every fallible operation on [`Value`] returns an [`EvalResult`]. Errors are
//! raised at the point of violation and never retried or recovered inside this
//! crate; generated code decides whether to report, translate, or abort.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the structured data for each failure. Several kinds
//! can belong to the same user-facing category (for example `DivisionByZero`
//! and `ModuloByZero`), so [`EvalError::category`] folds them into the closed
//! [`ErrorCategory`] taxonomy callers match on.
//!
//! Factory functions (e.g. `division_by_zero()`) are the public way to build
//! errors: they populate both `kind` and the rendered `message`.

use std::fmt;

use crate::value::{Kind, Value};

/// Result of a value operation.
pub type EvalResult = Result<Value, EvalError>;

/// The closed error taxonomy exposed to generated code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// An operator or free function received an operand kind it does not support.
    TypeMismatch,
    /// `/` or `%` with a zero right-hand side.
    DivisionByZero,
    /// Integer index outside the sequence.
    IndexOutOfRange,
    /// Increment, decrement, iteration or a call shape the kind does not support.
    InvalidOperation,
    /// Invocation of a non-function value.
    NotCallable,
    /// String-keyed lookup missed both the field map and the method registry.
    MethodNotFound,
    /// `exit` was requested in a mode that does not terminate the process.
    Exit,
}

/// Typed error kind.
///
/// The `Display` impl produces the message stored on [`EvalError`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("cannot apply `{op}` to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: Kind,
        right: Kind,
    },
    #[error("`{op}` cannot be applied to {kind}")]
    UnsupportedOperand { op: &'static str, kind: Kind },
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("cannot index {receiver} with {key}")]
    InvalidIndex { receiver: Kind, key: Kind },
    #[error("cannot {op} {kind}")]
    InvalidOperation { op: &'static str, kind: Kind },
    #[error("{code} is not a valid character code")]
    InvalidCharCode { code: i64 },
    #[error("{name} expects {expected} argument(s), got {got}")]
    WrongArgCount {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("{kind} is not callable")]
    NotCallable { kind: Kind },
    #[error("no method '{method}' for {kind}")]
    MethodNotFound { method: String, kind: Kind },
    #[error("program exited with status {status}")]
    ProgramExit { status: i32 },
}

impl EvalErrorKind {
    /// Fold this kind into the public taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TypeMismatch { .. }
            | Self::UnsupportedOperand { .. }
            | Self::InvalidIndex { .. } => ErrorCategory::TypeMismatch,
            Self::DivisionByZero | Self::ModuloByZero => ErrorCategory::DivisionByZero,
            Self::IndexOutOfRange { .. } => ErrorCategory::IndexOutOfRange,
            Self::InvalidOperation { .. }
            | Self::InvalidCharCode { .. }
            | Self::WrongArgCount { .. } => ErrorCategory::InvalidOperation,
            Self::NotCallable { .. } => ErrorCategory::NotCallable,
            Self::MethodNotFound { .. } => ErrorCategory::MethodNotFound,
            Self::ProgramExit { .. } => ErrorCategory::Exit,
        }
    }
}

/// Runtime error raised by a value operation.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error kind.
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// Secondary context lines attached by callers.
    pub notes: Vec<String>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Attach a context note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// True for both `/` and `%` by zero.
    #[inline]
    pub fn is_division_by_zero(&self) -> bool {
        self.category() == ErrorCategory::DivisionByZero
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Operator Errors

/// Binary operator applied to an unsupported pair of kinds.
#[cold]
pub fn type_mismatch(op: &'static str, left: Kind, right: Kind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { op, left, right })
}

/// Unary operator, cast or method applied to an unsupported kind.
#[cold]
pub fn unsupported_operand(op: &'static str, kind: Kind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperand { op, kind })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

/// Increment, decrement, iteration, and similar on a kind without support.
#[cold]
pub fn invalid_operation(op: &'static str, kind: Kind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperation { op, kind })
}

#[cold]
pub fn invalid_char_code(code: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidCharCode { code })
}

// Access Errors

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index, len })
}

/// Receiver cannot be indexed with a key of this kind.
#[cold]
pub fn invalid_index(receiver: Kind, key: Kind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIndex { receiver, key })
}

#[cold]
pub fn method_not_found(method: &str, kind: Kind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MethodNotFound {
        method: method.to_string(),
        kind,
    })
}

// Call Errors

#[cold]
pub fn not_callable(kind: Kind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { kind })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgCount {
        name: name.to_string(),
        expected,
        got,
    })
}

/// `exit` called in a mode that reports instead of terminating.
#[cold]
pub fn program_exit(status: i32) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ProgramExit { status })
}
