#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::errors::{ErrorCategory, EvalErrorKind};
use crate::value::Kind;
use pretty_assertions::assert_eq;

fn int_list(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::Int).collect())
}

#[test]
fn int_arithmetic_stays_int() {
    let (a, b) = (Value::Int(7), Value::Int(2));
    assert_eq!(a.checked_add(&b).unwrap(), Value::Int(9));
    assert_eq!(a.checked_sub(&b).unwrap(), Value::Int(5));
    assert_eq!(a.checked_mul(&b).unwrap(), Value::Int(14));
    assert_eq!(a.checked_div(&b).unwrap(), Value::Int(3));
    assert_eq!(a.checked_rem(&b).unwrap(), Value::Int(1));
}

#[test]
fn int_division_truncates_toward_zero() {
    assert_eq!(
        Value::Int(-7).checked_div(&Value::Int(2)).unwrap(),
        Value::Int(-3)
    );
}

#[test]
fn float_operand_promotes() {
    assert_eq!(
        Value::Int(1).checked_add(&Value::Float(2.0)).unwrap(),
        Value::Float(3.0)
    );
    assert_eq!(
        Value::Float(7.0).checked_div(&Value::Int(2)).unwrap(),
        Value::Float(3.5)
    );
}

#[test]
fn bool_and_char_act_as_ints() {
    assert_eq!(
        Value::Bool(true).checked_add(&Value::Bool(true)).unwrap(),
        Value::Int(2)
    );
    assert_eq!(
        Value::Char('a').checked_add(&Value::Int(1)).unwrap(),
        Value::Int(98)
    );
    assert_eq!(
        Value::Char('a').checked_mul(&Value::Float(0.5)).unwrap(),
        Value::Float(48.5)
    );
}

#[test]
fn remainder_sign_follows_dividend() {
    assert_eq!(
        Value::Int(7).checked_rem(&Value::Int(3)).unwrap(),
        Value::Int(1)
    );
    assert_eq!(
        Value::Int(-7).checked_rem(&Value::Int(3)).unwrap(),
        Value::Int(-1)
    );
    assert_eq!(
        Value::Int(7).checked_rem(&Value::Int(-3)).unwrap(),
        Value::Int(1)
    );
    assert_eq!(
        Value::Float(5.5).checked_rem(&Value::Int(2)).unwrap(),
        Value::Float(1.5)
    );
}

#[test]
fn division_by_zero_is_reported() {
    let div = Value::Int(5).checked_div(&Value::Int(0)).unwrap_err();
    assert_eq!(div.kind, EvalErrorKind::DivisionByZero);
    let rem = Value::Int(5).checked_rem(&Value::Int(0)).unwrap_err();
    assert_eq!(rem.kind, EvalErrorKind::ModuloByZero);
    assert!(div.is_division_by_zero() && rem.is_division_by_zero());

    let float = Value::Float(1.0).checked_div(&Value::Float(0.0)).unwrap_err();
    assert!(float.is_division_by_zero());
    let falsy = Value::Int(1).checked_div(&Value::Bool(false)).unwrap_err();
    assert!(falsy.is_division_by_zero());
}

#[test]
fn list_concatenation() {
    assert_eq!(
        int_list(&[1, 2]).checked_add(&int_list(&[3])).unwrap(),
        int_list(&[1, 2, 3])
    );
}

#[test]
fn string_concatenation_renders_both_sides() {
    assert_eq!(
        Value::string("a").checked_add(&Value::Int(1)).unwrap(),
        Value::string("a1")
    );
    assert_eq!(
        Value::Float(1.5).checked_add(&Value::string("x")).unwrap(),
        Value::string("1.500000x")
    );
    assert_eq!(
        int_list(&[1]).checked_add(&Value::string("!")).unwrap(),
        Value::string("[1]!")
    );
}

#[test]
fn arithmetic_type_mismatch() {
    let err = Value::object().checked_add(&Value::Int(1)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            op: "+",
            left: Kind::Object,
            right: Kind::Int,
        }
    );
    for (l, r) in [
        (Value::string("a"), Value::Int(1)),
        (int_list(&[1]), int_list(&[2])),
        (Value::Null, Value::Int(1)),
    ] {
        let err = l.checked_sub(&r).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::TypeMismatch);
    }
}

#[test]
fn negation() {
    assert_eq!(Value::Int(3).negate().unwrap(), Value::Int(-3));
    assert_eq!(Value::Float(0.5).negate().unwrap(), Value::Float(-0.5));
    assert_eq!(Value::Bool(true).negate().unwrap(), Value::Int(-1));
    assert_eq!(
        Value::string("a").negate().unwrap_err().category(),
        ErrorCategory::TypeMismatch
    );
}

#[test]
fn equality_across_groups() {
    assert!(Value::Int(1).equals(&Value::Float(1.0)));
    assert!(Value::Int(1).equals(&Value::Bool(true)));
    assert!(Value::Char('A').equals(&Value::Int(65)));
    assert!(Value::Null.equals(&Value::Null));
    assert!(Value::string("ab").equals(&Value::string("ab")));
    assert!(int_list(&[1, 2]).equals(&Value::list(vec![
        Value::Float(1.0),
        Value::Bool(false).checked_add(&Value::Int(2)).unwrap(),
    ])));

    assert!(!Value::string("1").equals(&Value::Int(1)));
    assert!(!Value::string("ab").equals(&Value::list(vec![Value::Char('a')])));
    assert!(!Value::Null.equals(&Value::Int(0)));
    assert!(!int_list(&[1]).equals(&int_list(&[1, 2])));
    assert!(Value::Int(1).not_equals(&Value::string("1")));
}

#[test]
fn strings_and_lists_compare_element_wise() {
    let chars = Value::list(vec![Value::Char('a'), Value::Char('b')]);
    assert!(Value::string("ab").equals(&chars));
    assert!(chars.equals(&Value::string("ab")));
    assert!(Value::string("A").equals(&Value::list(vec![Value::Int(65)])));
    assert!(!Value::string("ab").not_equals(&chars));
    assert!(Value::string("").equals(&Value::list(vec![])));
}

#[test]
fn functions_and_objects_are_never_equal() {
    let f = Value::function(|_| Ok(Value::Null));
    assert!(!f.equals(&f.clone()));
    let o = Value::object();
    assert!(!o.equals(&o.clone()));
}

#[test]
fn ordering_scalars_and_strings() {
    assert!(Value::Int(2).less_than(&Value::Float(2.5)).unwrap());
    assert!(Value::Int(3).greater_than(&Value::Char('\u{2}')).unwrap());
    assert!(Value::Int(2).less_equal(&Value::Int(2)).unwrap());
    assert!(Value::Int(2).greater_equal(&Value::Int(2)).unwrap());
    assert!(!Value::Int(3).less_equal(&Value::Int(2)).unwrap());

    assert!(Value::string("abc").less_than(&Value::string("abd")).unwrap());
    assert!(Value::string("ab").less_than(&Value::string("abc")).unwrap());
    assert!(Value::string("b").greater_than(&Value::string("abc")).unwrap());
    assert!(Value::string("").less_equal(&Value::string("")).unwrap());
}

#[test]
fn ordering_incompatible_kinds_fails() {
    let err = Value::Int(1).less_than(&Value::string("1")).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            op: "<",
            left: Kind::Int,
            right: Kind::String,
        }
    );
    assert!(int_list(&[1]).greater_equal(&int_list(&[0])).is_err());
    assert!(Value::Null.less_equal(&Value::Null).is_err());
}

#[test]
fn logical_operators_use_truthiness() {
    assert_eq!(
        Value::Int(2).logical_and(&Value::string("x")),
        Value::Bool(true)
    );
    assert_eq!(Value::Int(2).logical_and(&Value::Null), Value::Bool(false));
    assert_eq!(
        Value::list(vec![]).logical_or(&Value::Float(0.0)),
        Value::Bool(false)
    );
    assert_eq!(Value::list(vec![]).logical_not(), Value::Bool(true));
    assert_eq!(
        evaluate_binary(&Value::Null, &Value::Int(1), BinaryOp::Or).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn compound_assignment_updates_in_place() {
    let mut x = Value::Int(10);
    x.add_assign(&Value::Int(5)).unwrap();
    x.sub_assign(&Value::Int(3)).unwrap();
    x.mul_assign(&Value::Int(2)).unwrap();
    x.div_assign(&Value::Int(5)).unwrap();
    assert_eq!(x, Value::Int(4));
    x.rem_assign(&Value::Int(3)).unwrap();
    assert_eq!(x, Value::Int(1));

    let mut s = Value::string("n=");
    s.add_assign(&Value::Int(4)).unwrap();
    assert_eq!(s, Value::string("n=4"));
}

#[test]
fn failed_compound_assignment_leaves_operand() {
    let mut x = Value::Int(10);
    assert!(x.div_assign(&Value::Int(0)).is_err());
    assert_eq!(x, Value::Int(10));
}

#[test]
fn increment_and_decrement() {
    let mut x = Value::Int(1);
    assert_eq!(x.post_increment().unwrap(), Value::Int(1));
    assert_eq!(x, Value::Int(2));
    assert_eq!(x.pre_increment().unwrap(), Value::Int(3));
    assert_eq!(x.pre_decrement().unwrap(), Value::Int(2));
    assert_eq!(x.post_decrement().unwrap(), Value::Int(2));
    assert_eq!(x, Value::Int(1));

    let mut f = Value::Float(0.5);
    assert_eq!(f.pre_increment().unwrap(), Value::Float(1.5));

    let mut c = Value::Char('a');
    assert_eq!(c.pre_increment().unwrap(), Value::Int(98));
}

#[test]
fn increment_rejects_non_scalars() {
    let mut list = int_list(&[1]);
    let err = list.pre_increment().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidOperation);
    assert_eq!(list, int_list(&[1]));
    assert!(Value::Null.post_decrement().is_err());
}

#[test]
fn operator_traits() {
    let (a, b) = (Value::Int(6), Value::Int(4));
    assert_eq!((&a + &b).unwrap(), Value::Int(10));
    assert_eq!((&a - &b).unwrap(), Value::Int(2));
    assert_eq!((&a * &b).unwrap(), Value::Int(24));
    assert_eq!((&a / &b).unwrap(), Value::Int(1));
    assert_eq!((&a % &b).unwrap(), Value::Int(2));
    assert_eq!((-&a).unwrap(), Value::Int(-6));
    assert_eq!(!&a, Value::Bool(false));
}

#[test]
fn symbols() {
    assert_eq!(BinaryOp::LtEq.as_symbol(), "<=");
    assert!(BinaryOp::Mod.is_arithmetic());
    assert!(!BinaryOp::And.is_arithmetic());
}
