//! Sequence and field access.
//!
//! Reads and writes are separate operations. [`Value::get`] never mutates;
//! [`Value::get_or_insert`] auto-creates a missing object field as `Null`
//! and hands out a mutable slot. Integer keys address `List`/`String`
//! elements, string keys address object fields or fall through to the
//! method registry.

use std::slice;

use crate::errors::{
    index_out_of_range, invalid_index, invalid_operation, method_not_found, type_mismatch,
    EvalError, EvalResult,
};
use crate::registry::MethodRegistry;
use crate::value::{Kind, Value};

/// Resolve an integer key against a sequence length.
fn checked_position(index: i64, len: usize) -> Result<usize, EvalError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_range(index, len))
}

impl Value {
    // Element Access

    /// Copy of the element at `index` in a `List` or `String`.
    pub fn element(&self, index: i64) -> EvalResult {
        let items = self
            .as_sequence()
            .ok_or_else(|| invalid_index(self.kind(), Kind::Int))?;
        let position = checked_position(index, items.len())?;
        Ok(items[position].clone())
    }

    /// In-place slot for the element at `index` of a `List`.
    ///
    /// Strings hand out no slots, since a slot could store a non-`Char`;
    /// write into them with [`Value::set_element`].
    pub fn element_mut(&mut self, index: i64) -> Result<&mut Value, EvalError> {
        match self {
            Value::List(items) => {
                let position = checked_position(index, items.len())?;
                Ok(&mut items[position])
            }
            Value::Str(_) => Err(invalid_operation("[]= by reference", Kind::String)),
            other => Err(invalid_index(other.kind(), Kind::Int)),
        }
    }

    /// Replace the element at `index`. Strings only accept `Char` elements.
    pub fn set_element(&mut self, index: i64, value: Value) -> Result<(), EvalError> {
        match self {
            Value::Str(chars) => {
                if value.kind() != Kind::Char {
                    return Err(type_mismatch("[]=", Kind::String, value.kind()));
                }
                let position = checked_position(index, chars.len())?;
                chars[position] = value;
                Ok(())
            }
            _ => {
                *self.element_mut(index)? = value;
                Ok(())
            }
        }
    }

    // Field Access

    /// Field of an `Object`, without creating it.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.as_fields().and_then(|fields| fields.get(name))
    }

    /// Copy of a field, or `Null` when absent or when `self` is not an object.
    pub fn field(&self, name: &str) -> Value {
        self.get_field(name).cloned().unwrap_or_default()
    }

    /// Mutable field slot, created as `Null` when absent.
    pub fn field_or_insert(&mut self, name: &str) -> Result<&mut Value, EvalError> {
        match self {
            Value::Object(fields) => Ok(fields.entry(name.to_string()).or_default()),
            other => Err(invalid_index(other.kind(), Kind::String)),
        }
    }

    /// Insert or replace a field on an `Object`.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        *self.field_or_insert(name)? = value;
        Ok(())
    }

    /// Read-only string-keyed lookup.
    ///
    /// On an `Object` a present field wins, then a registered method bound
    /// to the object, then `Null`. Every other kind resolves the name through
    /// the registry only and fails with `MethodNotFound` on a miss.
    pub fn member(&self, name: &str, methods: &MethodRegistry) -> EvalResult {
        match self {
            Value::Object(fields) => match fields.get(name) {
                Some(value) => Ok(value.clone()),
                None if methods.contains(name) => methods.bind(self, name),
                None => Ok(Value::Null),
            },
            _ if methods.contains(name) => methods.bind(self, name),
            _ => Err(method_not_found(name, self.kind())),
        }
    }

    // Keyed Access

    /// Read-only `self[key]`.
    ///
    /// `Int` keys index sequences; `String` keys go through [`Value::member`].
    pub fn get(&self, key: &Value, methods: &MethodRegistry) -> EvalResult {
        match key {
            Value::Int(index) => self.element(*index),
            Value::Str(_) => {
                let name = key.to_string();
                self.member(&name, methods)
            }
            other => Err(invalid_index(self.kind(), other.kind())),
        }
    }

    /// Mutable `self[key]`, auto-creating missing object fields.
    ///
    /// An `Int` key on a `String` is rejected; use [`Value::set`].
    pub fn get_or_insert(&mut self, key: &Value) -> Result<&mut Value, EvalError> {
        match key {
            Value::Int(index) => self.element_mut(*index),
            Value::Str(_) => self.field_or_insert(&key.to_string()),
            other => Err(invalid_index(self.kind(), other.kind())),
        }
    }

    /// `self[key] = value`, with the `Char` check for strings.
    pub fn set(&mut self, key: &Value, value: Value) -> Result<(), EvalError> {
        match key {
            Value::Int(index) => self.set_element(*index, value),
            _ => {
                *self.get_or_insert(key)? = value;
                Ok(())
            }
        }
    }

    // Iteration

    /// Element cursor over a `List` or `String`.
    pub fn elements(&self) -> Result<slice::Iter<'_, Value>, EvalError> {
        self.as_sequence()
            .map(<[Value]>::iter)
            .ok_or_else(|| invalid_operation("iterate", self.kind()))
    }
}
