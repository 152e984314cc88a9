//! Shared test utilities
//!
//! Each integration test binary pulls in only the helpers it needs.

#![allow(dead_code)]

use monkey_runtime::{Monkey, Value};

pub use pretty_assertions::{assert_eq, assert_ne};

/// Evaluate `source` in a fresh runtime, panicking on syntax errors
pub fn eval(source: &str) -> Value {
    match Monkey::new().eval(source) {
        Ok(value) => value,
        Err(diagnostics) => panic!(
            "unexpected syntax errors for {:?}: {:?}",
            source,
            diagnostics.iter().map(|d| &d.message).collect::<Vec<_>>()
        ),
    }
}

/// # Example
/// ```ignore
/// assert_eval_integer("1 + 2", 3);
/// ```
pub fn assert_eval_integer(source: &str, expected: i64) {
    match eval(source) {
        Value::Integer(n) => assert_eq!(n, expected, "source: {}", source),
        other => panic!("Expected Integer({}), got {:?} for {}", expected, other, source),
    }
}

pub fn assert_eval_bool(source: &str, expected: bool) {
    match eval(source) {
        Value::Boolean(b) => assert_eq!(b, expected, "source: {}", source),
        other => panic!("Expected Boolean({}), got {:?} for {}", expected, other, source),
    }
}

pub fn assert_eval_string(source: &str, expected: &str) {
    match eval(source) {
        Value::String(s) => assert_eq!(s.as_ref(), expected, "source: {}", source),
        other => panic!("Expected String({:?}), got {:?} for {}", expected, other, source),
    }
}

pub fn assert_eval_null(source: &str) {
    match eval(source) {
        Value::Null => {}
        other => panic!("Expected Null, got {:?} for {}", other, source),
    }
}

/// Assert that evaluation produces an error value with exactly this message
pub fn assert_eval_error(source: &str, expected: &str) {
    match eval(source) {
        Value::Error(message) => assert_eq!(message, expected, "source: {}", source),
        other => panic!("Expected Error({:?}), got {:?} for {}", expected, other, source),
    }
}

/// Assert on the displayed form of the result
pub fn assert_eval_display(source: &str, expected: &str) {
    assert_eq!(eval(source).to_string(), expected, "source: {}", source);
}
