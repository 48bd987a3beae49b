//! Standard free functions (`type`, `len`, casts, `string`, `list`).
//!
//! Each builtin takes exactly one value. `print` and `exit` need an output
//! channel and live on [`Runtime`](crate::Runtime) instead.

use quill_value::{invalid_char_code, unsupported_operand, EvalError, EvalResult, Value};

/// Signature shared by the single-argument builtins.
pub type BuiltinFn = fn(&Value) -> EvalResult;

/// Source-level names resolvable through [`lookup`].
pub const BUILTIN_NAMES: [&str; 9] = [
    "type", "len", "null", "int", "float", "bool", "char", "string", "list",
];

/// Resolve a source-level builtin name.
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    let f: BuiltinFn = match name {
        "type" => type_of,
        "len" => len,
        "null" => null,
        "int" => to_int,
        "float" => to_float,
        "bool" => to_bool,
        "char" => to_char,
        "string" => to_string,
        "list" => to_list,
        _ => return None,
    };
    Some(f)
}

/// Kind name as a string value.
pub fn type_of(value: &Value) -> EvalResult {
    Ok(Value::string(value.type_name()))
}

/// Element count of a `List` or `String`.
pub fn len(value: &Value) -> EvalResult {
    let items = value
        .as_sequence()
        .ok_or_else(|| unsupported_operand("len", value.kind()))?;
    Ok(Value::Int(i64::try_from(items.len()).unwrap_or(i64::MAX)))
}

/// Discards its argument.
pub fn null(_value: &Value) -> EvalResult {
    Ok(Value::Null)
}

fn scalar(value: &Value, op: &'static str) -> Result<f64, EvalError> {
    value
        .numeric()
        .ok_or_else(|| unsupported_operand(op, value.kind()))
}

/// Truncate a scalar toward zero.
pub fn to_int(value: &Value) -> EvalResult {
    scalar(value, "int").map(Value::truncated)
}

pub fn to_float(value: &Value) -> EvalResult {
    scalar(value, "float").map(Value::Float)
}

/// Truthiness of a scalar.
pub fn to_bool(value: &Value) -> EvalResult {
    scalar(value, "bool")?;
    Ok(Value::Bool(value.is_truthy()))
}

/// Character whose code point is the scalar's truncated value.
#[allow(
    clippy::cast_possible_truncation,
    reason = "saturating truncation; out-of-range codes are rejected below"
)]
pub fn to_char(value: &Value) -> EvalResult {
    let code = scalar(value, "char")?.trunc() as i64;
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(Value::Char)
        .ok_or_else(|| invalid_char_code(code))
}

/// Textual rendering as a string value.
pub fn to_string(value: &Value) -> EvalResult {
    Ok(Value::string(&value.to_string()))
}

/// Normalize into a list: lists pass through, strings expand into their
/// characters, anything else becomes a singleton.
pub fn to_list(value: &Value) -> EvalResult {
    Ok(match value {
        Value::List(_) => value.clone(),
        Value::Str(chars) => Value::List(chars.clone()),
        other => Value::list(vec![other.clone()]),
    })
}

/// Space-separated rendering used by `print` and `exit`.
pub fn render_args(args: &[Value]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&arg.to_string());
    }
    out
}
