//! Closure and scoping tests
//!
//! Functions capture the environment they were defined in. Calls run in a
//! fresh child of that environment, never of the caller's.

mod common;

use common::*;
#[allow(unused_imports)]
use common::{assert_eq, assert_ne};
use monkey_runtime::{Monkey, Value};

// ============================================================================
// Capture
// ============================================================================

#[test]
fn test_adder_factory() {
    let source = "
        let newAdder = fn(x) { fn(y) { x + y }; };
        let addTwo = newAdder(2);
        addTwo(2);
    ";
    assert_eval_integer(source, 4);
}

#[test]
fn test_each_call_captures_its_own_scope() {
    let source = "
        let newAdder = fn(x) { fn(y) { x + y } };
        let addOne = newAdder(1);
        let addTen = newAdder(10);
        addOne(1) + addTen(1);
    ";
    assert_eval_integer(source, 13);
}

#[test]
fn test_nested_closures() {
    let source = "
        let outer = fn(a) { fn(b) { fn(c) { a + b + c } } };
        outer(1)(2)(3);
    ";
    assert_eval_integer(source, 6);
}

#[test]
fn test_closure_sees_later_global_bindings() {
    // lookup happens at call time through the captured chain
    let source = "
        let f = fn() { later };
        let later = 7;
        f();
    ";
    assert_eval_integer(source, 7);
}

// ============================================================================
// Lexical, not dynamic, scope
// ============================================================================

#[test]
fn test_lexical_scope() {
    let source = "
        let x = 1;
        let get = fn() { x };
        let shadow = fn(x) { get() };
        shadow(99);
    ";
    assert_eval_integer(source, 1);
}

#[test]
fn test_caller_locals_are_invisible() {
    let source = "
        let read = fn() { secret };
        let call = fn() { let secret = 5; read() };
        call();
    ";
    assert_eval_error(source, "identifier not found: secret");
}

#[test]
fn test_let_in_function_stays_local() {
    let source = "
        let x = 1;
        let f = fn() { let x = 2; x };
        f() * 10 + x;
    ";
    assert_eval_integer(source, 21);
}

#[test]
fn test_parameters_shadow_outer_names() {
    assert_eval_integer("let x = 5; let f = fn(x) { x * 2 }; f(3) + x;", 11);
}

// ============================================================================
// Recursion
// ============================================================================

#[test]
fn test_recursive_fibonacci() {
    let source = "
        let fib = fn(n) { if (n < 2) { n } else { fib(n - 1) + fib(n - 2) } };
        fib(15);
    ";
    assert_eval_integer(source, 610);
}

#[test]
fn test_recursive_closure_over_array() {
    let source = "
        let sum = fn(arr) {
            if (len(arr) == 0) { return 0; }
            head(arr)[0] + sum(tail(arr))
        };
        sum([1, 2, 3, 4, 5]);
    ";
    assert_eval_integer(source, 15);
}

// ============================================================================
// Functions as values
// ============================================================================

#[test]
fn test_function_identity() {
    assert_eval_bool("let f = fn() { 1 }; let g = f; f == g", true);
    assert_eval_bool("fn() { 1 } == fn() { 1 }", false);
    assert_eval_bool("len == len", true);
}

#[test]
fn test_functions_in_collections() {
    let source = r#"
        let ops = {"double": fn(x) { x * 2 }, "square": fn(x) { x * x }};
        ops["double"](3) + ops["square"](3);
    "#;
    assert_eval_integer(source, 15);
}

#[test]
fn test_closure_survives_across_evals() {
    let runtime = Monkey::new();
    runtime
        .eval("let base = 100; let addBase = fn(n) { base + n };")
        .unwrap();
    assert_eq!(runtime.eval("addBase(1)"), Ok(Value::Integer(101)));

    runtime.eval("let base = 200;").unwrap();
    assert_eq!(runtime.eval("addBase(1)"), Ok(Value::Integer(201)));
}
