//! Coercion and operator engine.
//!
//! The kind set is closed, so every operator is a direct `match` over the
//! operand kinds rather than a trait-object dispatch.
//!
//! # Scalar Promotion
//!
//! Scalar operands (`Bool`, `Char`, `Int`, `Float`) are lifted to `f64`
//! through [`Value::numeric`], combined, and narrowed back: the result is a
//! `Float` when either operand is a `Float`, otherwise an `Int` truncated
//! toward zero. `%` is the truncating remainder, so its sign follows the
//! dividend.
//!
//! # Comparison
//!
//! `==` never fails: incompatible kinds are simply unequal. Ordering is only
//! defined between scalars and between strings; anything else is a type
//! mismatch. `<=` and `>=` are the negations of `>` and `<`.

use std::ops;

use crate::errors::{
    division_by_zero, invalid_operation, modulo_by_zero, type_mismatch, unsupported_operand,
    EvalError, EvalResult,
};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Binary operators available to generated code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

// Direct Dispatch Functions

/// Evaluate a binary operation.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub => eval_scalar_arith(left, right, op, |a, b| Ok(a - b)),
        BinaryOp::Mul => eval_scalar_arith(left, right, op, |a, b| Ok(a * b)),
        BinaryOp::Div => eval_scalar_arith(left, right, op, checked_div),
        BinaryOp::Mod => eval_scalar_arith(left, right, op, checked_rem),
        BinaryOp::Eq => Ok(Value::Bool(values_equal(left, right))),
        BinaryOp::NotEq => Ok(Value::Bool(!values_equal(left, right))),
        BinaryOp::Lt => ordered(left, right, op, is_less),
        BinaryOp::Gt => ordered(left, right, op, |l, r| is_less(r, l)),
        BinaryOp::LtEq => ordered(left, right, op, |l, r| is_less(r, l).map(|gt| !gt)),
        BinaryOp::GtEq => ordered(left, right, op, |l, r| is_less(l, r).map(|lt| !lt)),
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

/// Evaluate a unary operation.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Neg => match value.numeric() {
            Some(n) => Ok(promote(-n, is_float(value))),
            None => Err(unsupported_operand("-", value.kind())),
        },
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
    }
}

// Arithmetic

#[inline]
fn is_float(value: &Value) -> bool {
    matches!(value, Value::Float(_))
}

#[inline]
fn promote(n: f64, float: bool) -> Value {
    if float {
        Value::Float(n)
    } else {
        Value::truncated(n)
    }
}

#[allow(clippy::float_cmp, reason = "only an exact zero divisor is rejected")]
fn checked_div(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        Err(division_by_zero())
    } else {
        Ok(a / b)
    }
}

#[allow(clippy::float_cmp, reason = "only an exact zero divisor is rejected")]
fn checked_rem(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        Err(modulo_by_zero())
    } else {
        Ok(a - b * (a / b).trunc())
    }
}

fn eval_scalar_arith(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    f: impl FnOnce(f64, f64) -> Result<f64, EvalError>,
) -> EvalResult {
    match (left.numeric(), right.numeric()) {
        (Some(a), Some(b)) => Ok(promote(f(a, b)?, is_float(left) || is_float(right))),
        _ => Err(type_mismatch(op.as_symbol(), left.kind(), right.kind())),
    }
}

/// `+` has two extra shapes on top of scalar arithmetic: list concatenation
/// and string concatenation of the rendered operands.
fn eval_add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::List(a), Value::List(b)) => {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend_from_slice(a);
            items.extend_from_slice(b);
            Ok(Value::List(items))
        }
        (Value::Str(_), _) | (_, Value::Str(_)) => {
            Ok(Value::string(&format!("{left}{right}")))
        }
        _ => eval_scalar_arith(left, right, BinaryOp::Add, |a, b| Ok(a + b)),
    }
}

// Comparison

/// Language-level equality.
///
/// Any two sequences compare element-wise, so a string equals the list of
/// its characters.
#[allow(clippy::float_cmp, reason = "scalar equality is exact numeric equality")]
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Str(a) | Value::List(a), Value::Str(b) | Value::List(b)) => {
            a.len() == b.len()
                && ensure_sufficient_stack(|| a.iter().zip(b).all(|(x, y)| values_equal(x, y)))
        }
        _ => match (left.numeric(), right.numeric()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// Strict `<`, or `None` when the pair has no ordering.
fn is_less(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Str(_), Value::Str(_)) => Some(left.to_string() < right.to_string()),
        _ => Some(left.numeric()? < right.numeric()?),
    }
}

fn ordered(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    f: impl FnOnce(&Value, &Value) -> Option<bool>,
) -> EvalResult {
    f(left, right)
        .map(Value::Bool)
        .ok_or_else(|| type_mismatch(op.as_symbol(), left.kind(), right.kind()))
}

fn expect_bool(result: EvalResult) -> Result<bool, EvalError> {
    result.map(|v| v.is_truthy())
}

// Value Operator Methods

impl Value {
    pub fn checked_add(&self, rhs: &Value) -> EvalResult {
        evaluate_binary(self, rhs, BinaryOp::Add)
    }

    pub fn checked_sub(&self, rhs: &Value) -> EvalResult {
        evaluate_binary(self, rhs, BinaryOp::Sub)
    }

    pub fn checked_mul(&self, rhs: &Value) -> EvalResult {
        evaluate_binary(self, rhs, BinaryOp::Mul)
    }

    pub fn checked_div(&self, rhs: &Value) -> EvalResult {
        evaluate_binary(self, rhs, BinaryOp::Div)
    }

    pub fn checked_rem(&self, rhs: &Value) -> EvalResult {
        evaluate_binary(self, rhs, BinaryOp::Mod)
    }

    pub fn negate(&self) -> EvalResult {
        evaluate_unary(self, UnaryOp::Neg)
    }

    #[inline]
    pub fn logical_not(&self) -> Value {
        Value::Bool(!self.is_truthy())
    }

    #[inline]
    pub fn logical_and(&self, rhs: &Value) -> Value {
        Value::Bool(self.is_truthy() && rhs.is_truthy())
    }

    #[inline]
    pub fn logical_or(&self, rhs: &Value) -> Value {
        Value::Bool(self.is_truthy() || rhs.is_truthy())
    }

    /// Language-level `==`: numeric across scalar kinds, element-wise for
    /// sequences of the same kind, and false for every other pairing.
    #[inline]
    pub fn equals(&self, rhs: &Value) -> bool {
        values_equal(self, rhs)
    }

    #[inline]
    pub fn not_equals(&self, rhs: &Value) -> bool {
        !values_equal(self, rhs)
    }

    pub fn less_than(&self, rhs: &Value) -> Result<bool, EvalError> {
        expect_bool(evaluate_binary(self, rhs, BinaryOp::Lt))
    }

    pub fn greater_than(&self, rhs: &Value) -> Result<bool, EvalError> {
        expect_bool(evaluate_binary(self, rhs, BinaryOp::Gt))
    }

    pub fn less_equal(&self, rhs: &Value) -> Result<bool, EvalError> {
        expect_bool(evaluate_binary(self, rhs, BinaryOp::LtEq))
    }

    pub fn greater_equal(&self, rhs: &Value) -> Result<bool, EvalError> {
        expect_bool(evaluate_binary(self, rhs, BinaryOp::GtEq))
    }

    // Compound assignment. `self` is only replaced when the operation succeeds.

    pub fn add_assign(&mut self, rhs: &Value) -> Result<(), EvalError> {
        self.assign_with(rhs, BinaryOp::Add)
    }

    pub fn sub_assign(&mut self, rhs: &Value) -> Result<(), EvalError> {
        self.assign_with(rhs, BinaryOp::Sub)
    }

    pub fn mul_assign(&mut self, rhs: &Value) -> Result<(), EvalError> {
        self.assign_with(rhs, BinaryOp::Mul)
    }

    pub fn div_assign(&mut self, rhs: &Value) -> Result<(), EvalError> {
        self.assign_with(rhs, BinaryOp::Div)
    }

    pub fn rem_assign(&mut self, rhs: &Value) -> Result<(), EvalError> {
        self.assign_with(rhs, BinaryOp::Mod)
    }

    fn assign_with(&mut self, rhs: &Value, op: BinaryOp) -> Result<(), EvalError> {
        *self = evaluate_binary(self, rhs, op)?;
        Ok(())
    }

    // Increment and decrement. Only scalars step; the step is `Int(1)`, so
    // `Bool` and `Char` become `Int` and `Float` stays `Float`.

    /// `++x`: returns the updated value.
    pub fn pre_increment(&mut self) -> EvalResult {
        self.step("increment", BinaryOp::Add)?;
        Ok(self.clone())
    }

    /// `x++`: returns the value before the update.
    pub fn post_increment(&mut self) -> EvalResult {
        let previous = self.clone();
        self.step("increment", BinaryOp::Add)?;
        Ok(previous)
    }

    pub fn pre_decrement(&mut self) -> EvalResult {
        self.step("decrement", BinaryOp::Sub)?;
        Ok(self.clone())
    }

    pub fn post_decrement(&mut self) -> EvalResult {
        let previous = self.clone();
        self.step("decrement", BinaryOp::Sub)?;
        Ok(previous)
    }

    fn step(&mut self, name: &'static str, op: BinaryOp) -> Result<(), EvalError> {
        if !self.is_scalar() {
            return Err(invalid_operation(name, self.kind()));
        }
        self.assign_with(&Value::Int(1), op)
    }
}

// Operator Traits
//
// Fallible operators yield an `EvalResult`, so `&a + &b` reads like the
// source expression and composes with `?`.

macro_rules! impl_binary_trait {
    ($trait:ident, $method:ident, $op:expr) => {
        impl ops::$trait<&Value> for &Value {
            type Output = EvalResult;

            fn $method(self, rhs: &Value) -> EvalResult {
                evaluate_binary(self, rhs, $op)
            }
        }
    };
}

impl_binary_trait!(Add, add, BinaryOp::Add);
impl_binary_trait!(Sub, sub, BinaryOp::Sub);
impl_binary_trait!(Mul, mul, BinaryOp::Mul);
impl_binary_trait!(Div, div, BinaryOp::Div);
impl_binary_trait!(Rem, rem, BinaryOp::Mod);

impl ops::Neg for &Value {
    type Output = EvalResult;

    fn neg(self) -> EvalResult {
        evaluate_unary(self, UnaryOp::Neg)
    }
}

impl ops::Not for &Value {
    type Output = Value;

    fn not(self) -> Value {
        self.logical_not()
    }
}

#[cfg(test)]
mod tests;
