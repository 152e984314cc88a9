//! Scalar built-ins

use crate::interpreter::Interpreter;
use crate::stdlib::arg_error;
use crate::value::{RuntimeError, Value};

/// `len(x)`: element count of an array, character count of a string
pub fn len(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    let [arg] = args else {
        return Err(arg_error(format!(
            "len() accepts single parameter, got={}",
            args.len()
        )));
    };
    match arg {
        Value::String(s) => Ok(Value::Integer(s.chars().count() as i64)),
        Value::Array(items) => Ok(Value::Integer(items.len() as i64)),
        other => Err(arg_error(format!(
            "len() accepts only strings / arrays, got={}",
            other.type_tag()
        ))),
    }
}

/// `parseInt(...)`: reserved, always `null`
pub fn parse_int(_: &mut Interpreter, _args: &[Value]) -> Result<Value, RuntimeError> {
    tracing::warn!("parseInt is not implemented; returning null");
    Ok(Value::Null)
}
