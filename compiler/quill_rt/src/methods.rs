//! Built-in method library.
//!
//! Installed into the [`MethodRegistry`] by default so generated code can
//! write `xs["len"]()` or `xs["push"](x)` on containers. Every method gets
//! its receiver as the first argument and returns a new value; the
//! receiver copy captured by the bound method is never modified.

use quill_value::{
    type_mismatch, unsupported_operand, wrong_arg_count, EvalError, EvalResult, Kind,
    MethodRegistry, Value,
};

use crate::builtins;

/// Register `len`, `push`, `contains`, `reverse`, `join` and `keys`.
pub fn register_builtin_methods(registry: &mut MethodRegistry) {
    registry.register_method("len", method_len);
    registry.register_method("push", method_push);
    registry.register_method("contains", method_contains);
    registry.register_method("reverse", method_reverse);
    registry.register_method("join", method_join);
    registry.register_method("keys", method_keys);
}

/// Split `[receiver, a1, ..., an]` into a fixed-size array.
///
/// `N` counts the receiver; arity errors report the caller-visible count.
fn method_args<'a, const N: usize>(
    name: &str,
    args: &'a [Value],
) -> Result<&'a [Value; N], EvalError> {
    <&[Value; N]>::try_from(args)
        .map_err(|_| wrong_arg_count(name, N.saturating_sub(1), args.len().saturating_sub(1)))
}

fn method_len(args: &[Value]) -> EvalResult {
    let [receiver] = method_args::<1>("len", args)?;
    builtins::len(receiver)
}

fn method_push(args: &[Value]) -> EvalResult {
    let [receiver, item] = method_args::<2>("push", args)?;
    match receiver {
        Value::List(items) => {
            let mut items = items.clone();
            items.push(item.clone());
            Ok(Value::List(items))
        }
        Value::Str(chars) if item.kind() == Kind::Char => {
            let mut chars = chars.clone();
            chars.push(item.clone());
            Ok(Value::Str(chars))
        }
        Value::Str(_) => Err(type_mismatch("push", Kind::String, item.kind())),
        other => Err(unsupported_operand("push", other.kind())),
    }
}

fn method_contains(args: &[Value]) -> EvalResult {
    let [receiver, needle] = method_args::<2>("contains", args)?;
    let found = match receiver {
        Value::Str(_) | Value::List(_) => receiver.elements()?.any(|item| item.equals(needle)),
        Value::Object(fields) => match needle {
            Value::Str(_) => fields.contains_key(&needle.to_string()),
            _ => false,
        },
        other => return Err(unsupported_operand("contains", other.kind())),
    };
    Ok(Value::Bool(found))
}

fn method_reverse(args: &[Value]) -> EvalResult {
    let [receiver] = method_args::<1>("reverse", args)?;
    match receiver {
        Value::List(items) => Ok(Value::List(items.iter().rev().cloned().collect())),
        Value::Str(chars) => Ok(Value::Str(chars.iter().rev().cloned().collect())),
        other => Err(unsupported_operand("reverse", other.kind())),
    }
}

fn method_join(args: &[Value]) -> EvalResult {
    let [receiver, separator] = method_args::<2>("join", args)?;
    let Value::List(items) = receiver else {
        return Err(unsupported_operand("join", receiver.kind()));
    };
    let separator = separator.to_string();
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&separator);
    Ok(Value::string(&joined))
}

fn method_keys(args: &[Value]) -> EvalResult {
    let [receiver] = method_args::<1>("keys", args)?;
    let fields = receiver
        .as_fields()
        .ok_or_else(|| unsupported_operand("keys", receiver.kind()))?;
    let mut names: Vec<&String> = fields.keys().collect();
    names.sort();
    Ok(Value::list(
        names.into_iter().map(|name| Value::string(name)).collect(),
    ))
}
