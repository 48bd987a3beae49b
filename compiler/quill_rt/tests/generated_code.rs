//! End-to-end tests shaped like the code the Quill generator emits.
//!
//! Each test builds a `Capture` runtime, runs a small "program" written
//! against the public surface, and checks the captured output.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use quill_rt::builtins;
use quill_rt::{init_tracing, Runtime, RuntimeBuilder, RuntimeMode, MODE_ENV_VAR};
use quill_value::{ErrorCategory, EvalError, EvalResult, Range, Value};

fn capture() -> Runtime {
    init_tracing();
    Runtime::builder().mode(RuntimeMode::Capture).build()
}

/// for i in 1..16 { if i % 15 == 0 {...} }
fn fizzbuzz(rt: &Runtime) -> Result<(), EvalError> {
    for i in Range::new(&Value::Int(1), &Value::Int(16))? {
        let line = if i.checked_rem(&Value::Int(15))?.equals(&Value::Int(0)) {
            Value::string("FizzBuzz")
        } else if i.checked_rem(&Value::Int(3))?.equals(&Value::Int(0)) {
            Value::string("Fizz")
        } else if i.checked_rem(&Value::Int(5))?.equals(&Value::Int(0)) {
            Value::string("Buzz")
        } else {
            i
        };
        rt.print(&[line]);
    }
    Ok(())
}

#[test]
fn loop_with_arithmetic_and_print() {
    let rt = capture();
    fizzbuzz(&rt).unwrap();
    let output = rt.output().output();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(&lines[..5], ["1", "2", "Fizz", "4", "Buzz"]);
    assert_eq!(lines[14], "FizzBuzz");
}

/// let p = object(); p["x"] = 3; p["y"] = p["x"] * 2.5; print(p["x"], p["y"], p["z"])
#[test]
fn object_fields_through_indexing() {
    let rt = capture();
    let mut p = Value::object();
    *p.get_or_insert(&Value::string("x")).unwrap() = Value::Int(3);
    let y = rt
        .get(&p, &Value::string("x"))
        .unwrap()
        .checked_mul(&Value::Float(2.5))
        .unwrap();
    *p.get_or_insert(&Value::string("y")).unwrap() = y;

    let args = [
        rt.get(&p, &Value::string("x")).unwrap(),
        rt.get(&p, &Value::string("y")).unwrap(),
        rt.get(&p, &Value::string("z")).unwrap(),
    ];
    rt.print(&args);
    assert_eq!(rt.output().output(), "3 7.500000 null\n");
    assert_eq!(p.as_fields().unwrap().len(), 2);
}

/// let xs = [3, 1]; xs = xs.push(2); for x in xs { total += x }; print(xs.len(), total)
#[test]
fn method_calls_on_containers() {
    let rt = capture();
    let mut xs = Value::list(vec![Value::Int(3), Value::Int(1)]);
    xs = rt
        .get(&xs, &Value::string("push"))
        .unwrap()
        .call(&[Value::Int(2)])
        .unwrap();

    let mut total = Value::Int(0);
    for x in xs.elements().unwrap() {
        total.add_assign(x).unwrap();
    }
    let count = rt.call_method(&xs, "len", &[]).unwrap();
    rt.print(&[count, total, xs.clone()]);

    let joined = rt
        .call_method(&xs, "join", &[Value::string("-")])
        .unwrap();
    rt.print(&[joined]);
    assert_eq!(rt.output().output(), "3 6 [3, 1, 2]\n3-1-2\n");
}

/// Builtins resolved by name, the way the generator maps `int(x)` etc.
#[test]
fn builtins_by_name() {
    let rt = capture();
    let call = |name: &str, arg: &Value| -> EvalResult {
        let f = builtins::lookup(name).unwrap();
        f(arg)
    };
    let n = call("int", &Value::Float(9.99)).unwrap();
    let c = call("char", &Value::Int(81)).unwrap();
    let t = call("type", &c).unwrap();
    let chars = call("list", &Value::string("hi")).unwrap();
    rt.print(&[n, c, t, chars]);
    assert_eq!(rt.output().output(), "9 Q char [h, i]\n");
}

fn checked_divide(rt: &Runtime, a: &Value, b: &Value) -> EvalResult {
    if b.equals(&Value::Int(0)) {
        return Err(rt.exit(&[Value::string("cannot divide"), a.clone(), Value::string("by zero")]));
    }
    a.checked_div(b)
}

#[test]
fn exit_unwinds_generated_program() {
    let rt = capture();
    assert_eq!(
        checked_divide(&rt, &Value::Int(9), &Value::Int(3)).unwrap(),
        Value::Int(3)
    );
    let err = checked_divide(&rt, &Value::Int(9), &Value::Int(0)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Exit);
    assert_eq!(rt.output().error_output(), "cannot divide 9 by zero\n");
}

#[test]
fn runtime_errors_propagate_with_categories() {
    let rt = capture();
    let program = || -> EvalResult {
        let xs = Value::list(vec![Value::Int(10), Value::Int(20)]);
        let first = rt.get(&xs, &Value::Int(0))?;
        rt.get(&xs, &first)
    };
    let err = program().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::IndexOutOfRange);
    assert_eq!(err.message, "index 10 out of range for length 2");
}

#[test]
fn mode_from_environment() {
    std::env::set_var(MODE_ENV_VAR, "capture");
    assert_eq!(RuntimeMode::from_env(), RuntimeMode::Capture);
    let rt = RuntimeBuilder::from_env().build();
    rt.print(&[Value::Int(1)]);
    assert_eq!(rt.output().output(), "1\n");

    std::env::set_var(MODE_ENV_VAR, "bogus");
    assert_eq!(RuntimeMode::from_env(), RuntimeMode::Native);
    std::env::remove_var(MODE_ENV_VAR);
}
