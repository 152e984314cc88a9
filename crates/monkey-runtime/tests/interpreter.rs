//! Evaluator integration tests
//!
//! Each case runs in a fresh `Monkey` runtime.

mod common;

use common::*;
#[allow(unused_imports)]
use common::{assert_eq, assert_ne};
use monkey_runtime::{error_codes, InterpreterOptions, Monkey, Value};
use rstest::rstest;

// ============================================================================
// Integers and booleans
// ============================================================================

#[rstest]
#[case("5", 5)]
#[case("-10", -10)]
#[case("5 + 5 + 5 + 5 - 10", 10)]
#[case("2 * 2 * 2 * 2 * 2", 32)]
#[case("-50 + 100 + -50", 0)]
#[case("20 + 2 * -10", 0)]
#[case("2 * (5 + 10)", 30)]
#[case("3 * (3 * 3) + 10", 37)]
#[case("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50)]
#[case("-7 / 2", -3)]
fn test_integer_expressions(#[case] source: &str, #[case] expected: i64) {
    assert_eval_integer(source, expected);
}

#[rstest]
#[case("true", true)]
#[case("1 < 2", true)]
#[case("1 > 2", false)]
#[case("1 == 1", true)]
#[case("1 != 1", false)]
#[case("true == true", true)]
#[case("true != false", true)]
#[case("(1 < 2) == true", true)]
#[case("(1 > 2) == true", false)]
#[case("3 + 4 * 5 == 3 * 1 + 4 * 5", true)]
#[case("!true", false)]
#[case("!5", false)]
#[case("!!5", true)]
#[case("!0", false)]
#[case("!\"\"", false)]
#[case("1 == true", false)]
#[case("\"1\" != 1", true)]
fn test_boolean_expressions(#[case] source: &str, #[case] expected: bool) {
    assert_eval_bool(source, expected);
}

#[test]
fn test_wrapping_arithmetic() {
    assert_eval_integer("9223372036854775807 + 1", i64::MIN);
}

// ============================================================================
// Conditionals and returns
// ============================================================================

#[rstest]
#[case("if (true) { 10 }", Some(10))]
#[case("if (false) { 10 }", None)]
#[case("if (1) { 10 }", Some(10))]
#[case("if (0) { 10 }", Some(10))]
#[case("if (1 < 2) { 10 } else { 20 }", Some(10))]
#[case("if (1 > 2) { 10 } else { 20 }", Some(20))]
#[case("if (if (false) { 1 }) { 10 } else { 20 }", Some(20))]
fn test_if_expressions(#[case] source: &str, #[case] expected: Option<i64>) {
    match expected {
        Some(n) => assert_eval_integer(source, n),
        None => assert_eval_null(source),
    }
}

#[rstest]
#[case("return 10;", 10)]
#[case("return 10; 9;", 10)]
#[case("9; return 2 * 5; 9;", 10)]
#[case("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10)]
#[case("let f = fn(x) { return x; x + 10; }; f(10);", 10)]
#[case(
    "let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
    20
)]
fn test_return_statements(#[case] source: &str, #[case] expected: i64) {
    assert_eval_integer(source, expected);
}

#[test]
fn test_return_stops_at_function_boundary() {
    let source = "
        let inner = fn() { return 1; };
        let outer = fn() { inner(); 2 };
        outer();
    ";
    assert_eval_integer(source, 2);
}

#[test]
fn test_let_and_empty_program_are_null() {
    assert_eval_null("let x = 1;");
    assert_eval_null("");
    assert_eval_null("fn() {}()");
}

// ============================================================================
// Runtime errors
// ============================================================================

#[rstest]
#[case("5 + true;", "type mismatch: INTEGER + BOOLEAN")]
#[case("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN")]
#[case("-true", "unknown operator: -BOOLEAN")]
#[case("true + false;", "unknown operator: BOOLEAN + BOOLEAN")]
#[case("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN")]
#[case("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN")]
#[case(
    "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
    "unknown operator: BOOLEAN + BOOLEAN"
)]
#[case("foobar", "identifier not found: foobar")]
#[case("\"Hello\" - \"World\"", "unknown operator: STRING - STRING")]
#[case("[1] + [2]", "unknown operator: ARRAY + ARRAY")]
#[case("null_value < 1", "identifier not found: null_value")]
#[case("1 / 0", "division by zero")]
#[case("1(2)", "not a function: INTEGER")]
#[case("5[0]", "index operator not supported: INTEGER")]
#[case("fn(x) { x }(1, 2)", "wrong number of arguments: want=1, got=2")]
#[case("fn(x, y) { x }(1)", "wrong number of arguments: want=2, got=1")]
#[case(
    "{\"name\": \"Monkey\"}[fn(x) { x }];",
    "Can't hash object of type FUNCTION"
)]
#[case("{[1]: 2}", "Can't hash object of type ARRAY")]
fn test_error_handling(#[case] source: &str, #[case] expected: &str) {
    assert_eval_error(source, expected);
}

#[test]
fn test_first_argument_error_wins() {
    assert_eval_error("len(a, b)", "identifier not found: a");
    assert_eval_error("[x, 1 / 0]", "identifier not found: x");
}

#[test]
fn test_error_display() {
    assert_eval_display("foobar", "ERROR: identifier not found: foobar");
}

#[test]
fn test_call_depth_limit() {
    let runtime = Monkey::with_options(InterpreterOptions { max_call_depth: 50 });
    let result = runtime
        .eval("let loop = fn(n) { loop(n + 1) }; loop(0);")
        .unwrap();
    assert_eq!(
        result,
        Value::Error("maximum call depth exceeded: 50".to_string())
    );

    // the guard resets after an error
    assert_eq!(
        runtime.eval("let down = fn(n) { if (n == 0) { 0 } else { down(n - 1) } }; down(40);"),
        Ok(Value::Integer(0))
    );
}

#[test]
fn test_deep_recursion_within_default_limit() {
    let source = "
        let count = fn(n) { if (n == 0) { 0 } else { 1 + count(n - 1) } };
        count(5000);
    ";
    assert_eval_integer(source, 5000);
}

#[test]
fn test_deeply_nested_input_fails_cleanly() {
    let runtime = Monkey::new();
    let diagnostics = runtime
        .eval(&format!("{}1", "-".repeat(100_000)))
        .unwrap_err();
    assert_eq!(diagnostics[0].code, error_codes::NESTED_TOO_DEEPLY);

    // the runtime stays usable
    assert_eq!(runtime.eval("1 + 1"), Ok(Value::Integer(2)));
}

#[test]
fn test_nested_expressions_below_limit() {
    assert_eval_integer(&format!("{}7", "-".repeat(600)), 7);
    assert_eval_integer(&format!("1{}", " + 1".repeat(900)), 901);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_strings() {
    assert_eval_string("\"Hello World!\"", "Hello World!");
    assert_eval_string("\"Hello\" + \", \" + \"World!\"", "Hello, World!");
    assert_eval_bool("\"a\" + \"b\" == \"ab\"", true);
    assert_eval_bool("\"a\" == \"b\"", false);
}

// ============================================================================
// Arrays
// ============================================================================

#[rstest]
#[case("[1, 2, 3][0]", Some(1))]
#[case("[1, 2, 3][2]", Some(3))]
#[case("let i = 0; [1][i];", Some(1))]
#[case("[1, 2, 3][1 + 1];", Some(3))]
#[case("let a = [1, 2, 3]; a[0] + a[1] + a[2];", Some(6))]
#[case("let a = [1, 2, 3]; let i = a[0]; a[i]", Some(2))]
#[case("[1, 2, 3][3]", None)]
#[case("[1, 2, 3][5]", None)]
#[case("[1, 2, 3][-1]", None)]
#[case("[1, 2, 3][-5]", None)]
fn test_array_indexing(#[case] source: &str, #[case] expected: Option<i64>) {
    match expected {
        Some(n) => assert_eval_integer(source, n),
        None => assert_eval_null(source),
    }
}

#[test]
fn test_array_literal() {
    assert_eval_display("[1, 2 * 2, 3 + 3]", "[1, 4, 6]");
    assert_eval_display("[1, \"two\", [true, null_free]]", "ERROR: identifier not found: null_free");
    assert_eval_display("[1, \"two\", [true]]", "[1, \"two\", [true]]");
}

#[test]
fn test_array_identity_equality() {
    assert_eval_bool("[1] == [1]", false);
    assert_eval_bool("let a = [1]; a == a", true);
    assert_eval_bool("let a = [1]; let b = a; a != b", false);
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn test_object_literal() {
    let source = r#"
        let two = "two";
        {
            "one": 10 - 9,
            two: 1 + 1,
            "thr" + "ee": 6 / 2,
            4: 4,
            true: 5,
            false: 6
        }
    "#;
    assert_eval_display(
        source,
        r#"{4: 4, false: 6, true: 5, "one": 1, "three": 3, "two": 2}"#,
    );
}

#[rstest]
#[case(r#"{"foo": 5}["foo"]"#, Some(5))]
#[case(r#"{"key": 1}["key"]"#, Some(1))]
#[case(r#"{"foo": 5}["bar"]"#, None)]
#[case(r#"let key = "foo"; {"foo": 5}[key]"#, Some(5))]
#[case(r#"{}["foo"]"#, None)]
#[case("{5: 5}[5]", Some(5))]
#[case("{true: 5}[true]", Some(5))]
#[case("{false: 5}[false]", Some(5))]
#[case("{1: 1, 1: 2}[1]", Some(2))]
fn test_object_indexing(#[case] source: &str, #[case] expected: Option<i64>) {
    match expected {
        Some(n) => assert_eval_integer(source, n),
        None => assert_eval_null(source),
    }
}

#[test]
fn test_string_keys_compare_by_content() {
    assert_eval_integer(r#"let k = "ab"; {"a" + "b": 7}[k]"#, 7);
}

// ============================================================================
// Functions
// ============================================================================

#[rstest]
#[case("let identity = fn(x) { x; }; identity(5);", 5)]
#[case("let identity = fn(x) { return x; }; identity(5);", 5)]
#[case("let double = fn(x) { x * 2; }; double(5);", 10)]
#[case("let add = fn(x, y) { x + y; }; add(5, 5);", 10)]
#[case("let add = fn(x, y) { return x + y; }; add(5 + 5, add(5, 5));", 20)]
#[case("fn(x) { x; }(5)", 5)]
fn test_function_application(#[case] source: &str, #[case] expected: i64) {
    assert_eval_integer(source, expected);
}

#[test]
fn test_function_display() {
    assert_eval_display("fn(x) { x + 2; }", "fn(x) { (x + 2); }");
    assert_eval_display("len", "builtin function len");
}

#[test]
fn test_user_bindings_shadow_builtins() {
    assert_eval_integer("let len = fn(x) { 42 }; len([1]);", 42);
}
