//! Built-in functions
//!
//! The catalog is fixed. Identifiers fall back to it only after the
//! environment chain misses, so a user `let len = ...` shadows the built-in.

pub mod array;
pub mod scalar;

use crate::value::{Builtin, RuntimeError, Value, ValueArray};

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: scalar::len,
    },
    Builtin {
        name: "head",
        func: array::head,
    },
    Builtin {
        name: "tail",
        func: array::tail,
    },
    Builtin {
        name: "slice",
        func: array::slice,
    },
    Builtin {
        name: "push",
        func: array::push,
    },
    Builtin {
        name: "map",
        func: array::map,
    },
    Builtin {
        name: "filter",
        func: array::filter,
    },
    Builtin {
        name: "reduce",
        func: array::reduce,
    },
    Builtin {
        name: "parseInt",
        func: scalar::parse_int,
    },
];

pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name).copied()
}

// === Argument helpers ===

pub(crate) fn arg_error(message: impl Into<String>) -> RuntimeError {
    RuntimeError::Builtin(message.into())
}

pub(crate) fn extract_array<'a>(name: &str, value: &'a Value) -> Result<&'a ValueArray, RuntimeError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(arg_error(format!(
            "{}() only supports arrays, got={}",
            name,
            other.type_tag()
        ))),
    }
}

/// User functions and built-ins are both accepted as callbacks
pub(crate) fn extract_callable(value: &Value) -> Result<&Value, RuntimeError> {
    match value {
        Value::Function(_) | Value::Builtin(_) => Ok(value),
        other => Err(arg_error(format!(
            "fn must be function, got={}",
            other.type_tag()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names() {
        let names: Vec<_> = BUILTINS.iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            vec!["len", "head", "tail", "slice", "push", "map", "filter", "reduce", "parseInt"]
        );
        assert!(lookup("reduce").is_some());
        assert!(lookup("puts").is_none());
    }

    #[test]
    fn test_extract_callable_rejects_values() {
        let err = extract_callable(&Value::Integer(1)).unwrap_err();
        assert_eq!(err.to_string(), "fn must be function, got=INTEGER");
    }
}
