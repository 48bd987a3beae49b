//! Quill Value - the dynamically-typed value model behind Quill-generated code.
//!
//! This crate provides:
//! - The runtime [`Value`] type and its nine kinds
//! - The coercion and operator engine (`+ - * / %`, comparison, logic,
//!   compound assignment, increment/decrement)
//! - Integer indexing into lists and strings, and string-keyed access into
//!   object fields
//! - The [`MethodRegistry`] that turns a string key into a bound method
//! - Half-open integer [`Range`]s for loops
//! - Evaluation errors ([`EvalError`], [`EvalResult`])
//!
//! Generated code never inspects a value's kind directly; it composes these
//! operations and lets failures propagate as `EvalError`s.

mod access;
mod errors;
mod operators;
mod range;
mod registry;
mod stack;
mod value;

pub use errors::{
    division_by_zero, index_out_of_range, invalid_char_code, invalid_index, invalid_operation,
    method_not_found, modulo_by_zero, not_callable, program_exit, type_mismatch,
    unsupported_operand, wrong_arg_count, ErrorCategory, EvalError, EvalErrorKind, EvalResult,
};
pub use operators::{evaluate_binary, evaluate_unary, BinaryOp, UnaryOp};
pub use range::{Range, RangeIter, RANGE_OPEN_END};
pub use registry::{MethodFn, MethodRegistry};
pub use stack::ensure_sufficient_stack;
pub use value::{Callable, Fields, Kind, NativeFn, Sequence, Value};
