//! Runtime values for Quill-generated code.
//!
//! # One Value, Nine Kinds
//!
//! `Value` is a closed sum type: exactly one payload is live at a time and
//! pattern matching replaces manual tag checks. The kinds fall into groups
//! that drive every operator rule:
//!
//! - **Scalar** (`Bool`, `Char`, `Int`, `Float`): share a numeric view,
//!   see [`Value::numeric`].
//! - **Iterable** (`String`, `List`): share an ordered element sequence.
//!   A string is a sequence of `Char` values, so indexing and iteration take
//!   the same code path for both.
//! - `Null`, `Function`, `Object`: everything else.
//!
//! # Copy Semantics
//!
//! `Clone` is a structural deep copy of sequences and field maps. Two values
//! are independent after a copy; an `Object` copy does not share its fields
//! with the original. Function payloads share their closure, which is
//! immutable once built.

mod callable;

use std::fmt;

use rustc_hash::FxHashMap;

use crate::stack::ensure_sufficient_stack;

pub use callable::{Callable, NativeFn};

/// Ordered element storage shared by `List` and `String`.
pub type Sequence = Vec<Value>;

/// Field storage for `Object` values.
pub type Fields = FxHashMap<String, Value>;

/// The active tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Char,
    Int,
    Float,
    String,
    List,
    Function,
    Object,
}

impl Kind {
    /// Name reported by the `type` builtin and used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::List => "list",
            Kind::Function => "function",
            Kind::Object => "object",
        }
    }

    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Kind::Bool | Kind::Char | Kind::Int | Kind::Float)
    }

    #[inline]
    pub const fn is_iterable(self) -> bool {
        matches!(self, Kind::String | Kind::List)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dynamically-typed runtime value.
#[derive(Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    /// Integral magnitude. Arithmetic runs in `f64` and truncates back, so
    /// exact results are bounded by the float mantissa.
    Int(i64),
    Float(f64),
    /// Text as a sequence of `Char` values. Only the factories build this
    /// variant; they never place a non-`Char` element inside.
    Str(Sequence),
    List(Sequence),
    Function(Callable),
    Object(Fields),
}

// Factory Methods

impl Value {
    /// Create a string value, one `Char` element per character.
    pub fn string(s: &str) -> Self {
        Value::Str(s.chars().map(Value::Char).collect())
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items)
    }

    /// Create a function value from a native closure.
    pub fn function(f: impl Fn(&[Value]) -> crate::EvalResult + Send + Sync + 'static) -> Self {
        Value::Function(Callable::new(f))
    }

    /// Create an object with no fields.
    #[inline]
    pub fn object() -> Self {
        Value::Object(Fields::default())
    }

    #[inline]
    pub fn object_from(fields: Fields) -> Self {
        Value::Object(fields)
    }

    /// Narrow a float to an `Int`, truncating toward zero.
    ///
    /// Out-of-range magnitudes saturate at the `i64` bounds and NaN becomes 0.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "truncation toward zero is the narrowing rule; `as` saturates"
    )]
    #[inline]
    pub fn truncated(n: f64) -> Self {
        Value::Int(n.trunc() as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(&s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Callable> for Value {
    fn from(f: Callable) -> Self {
        Value::Function(f)
    }
}

/// `None` maps to `Null`.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

// Value Methods

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Char(_) => Kind::Char,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Function(_) => Kind::Function,
            Value::Object(_) => Kind::Object,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.kind().is_scalar()
    }

    #[inline]
    pub fn is_iterable(&self) -> bool {
        self.kind().is_iterable()
    }

    /// Numeric view of a scalar: `Bool` is 0/1, `Char` is its code point.
    ///
    /// Returns `None` for every non-scalar kind.
    #[allow(
        clippy::cast_precision_loss,
        reason = "ints share the float slot; precision beyond the mantissa is an accepted limit"
    )]
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Char(c) => Some(f64::from(u32::from(*c))),
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Element slice of a `List` or `String`.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Str(items) | Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Value::Str(items) | Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Truthiness used by `!`, `&&`, `||` and conditionals.
    ///
    /// Scalars are truthy when non-zero, sequences when non-empty. `Null` is
    /// falsy. Functions and objects are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Str(items) | Value::List(items) => !items.is_empty(),
            Value::Function(_) | Value::Object(_) => true,
            scalar => scalar.numeric().is_some_and(|n| n != 0.0),
        }
    }

    /// Invoke a `Function` value.
    pub fn call(&self, args: &[Value]) -> crate::EvalResult {
        match self {
            Value::Function(f) => f.call(args),
            other => Err(crate::errors::not_callable(other.kind())),
        }
    }

    /// Non-empty list or object.
    fn has_children(&self) -> bool {
        match self {
            Value::List(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
            _ => false,
        }
    }

    /// Textual rendering; identical to the `Display` output.
    #[inline]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

// Trait Implementations

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Char(c) => Value::Char(*c),
            Value::Int(n) => Value::Int(*n),
            Value::Float(n) => Value::Float(*n),
            Value::Str(items) => Value::Str(items.clone()),
            Value::List(items) => Value::List(ensure_sufficient_stack(|| items.clone())),
            Value::Function(f) => Value::Function(f.clone()),
            Value::Object(fields) => Value::Object(ensure_sufficient_stack(|| fields.clone())),
        }
    }
}

/// Nested containers are torn down from an explicit worklist so dropping a
/// deeply nested list does not recurse once per level.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = match self {
            Value::List(items) if items.iter().any(Value::has_children) => {
                std::mem::take(items)
            }
            Value::Object(fields) if fields.values().any(Value::has_children) => {
                fields.drain().map(|(_, value)| value).collect()
            }
            _ => return,
        };
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::List(items) => pending.append(items),
                Value::Object(fields) => pending.extend(fields.drain().map(|(_, value)| value)),
                _ => {}
            }
        }
    }
}

/// Text form used by `print`, `string` and string concatenation.
///
/// Floats always carry six fractional digits. Strings nested in lists are
/// rendered bare, without quotes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:.6}"),
            Value::Str(items) => {
                for item in items {
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    ensure_sufficient_stack(|| write!(f, "{item}"))?;
                }
                f.write_str("]")
            }
            Value::Function(_) => f.write_str("<function>"),
            Value::Object(_) => f.write_str("<object>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Str(_) => write!(f, "Str({:?})", self.to_string()),
            Value::List(items) => ensure_sufficient_stack(|| write!(f, "List({items:?})")),
            Value::Function(func) => write!(f, "Function({func:?})"),
            Value::Object(fields) => {
                let mut names: Vec<_> = fields.keys().collect();
                names.sort();
                write!(f, "Object({names:?})")
            }
        }
    }
}

/// Structural identity: same kind and same payload.
///
/// This is the host-side comparison used by tests and containers. The
/// language-level `==`, which compares scalars numerically across kinds, is
/// [`Value::equals`].
impl PartialEq for Value {
    #[allow(clippy::float_cmp, reason = "structural identity compares payloads exactly")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) | (Value::List(a), Value::List(b)) => {
                ensure_sufficient_stack(|| a == b)
            }
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}
