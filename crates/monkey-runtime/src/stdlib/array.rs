//! Array built-ins
//!
//! None of these mutate their input; each returns a new array.

use crate::interpreter::Interpreter;
use crate::stdlib::{arg_error, extract_array, extract_callable};
use crate::value::{RuntimeError, Value, ValueArray};

fn single_array<'a>(name: &str, args: &'a [Value]) -> Result<&'a ValueArray, RuntimeError> {
    match args {
        [arg] => extract_array(name, arg),
        _ => Err(arg_error(format!(
            "{}() accepts single parameter, got={}",
            name,
            args.len()
        ))),
    }
}

/// Copy `items[begin..end]`, clamping both bounds into the array
fn sub_array(items: &ValueArray, begin: i64, end: i64) -> Value {
    let len = items.len() as i64;
    let begin = begin.clamp(0, len) as usize;
    let end = end.clamp(0, len) as usize;
    if begin >= end {
        return Value::array(Vec::new());
    }
    Value::array(items.as_slice()[begin..end].to_vec())
}

/// `head(arr)`: the first element, as a one-element array
pub fn head(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    let items = single_array("head", args)?;
    Ok(sub_array(items, 0, 1))
}

/// `tail(arr)`: everything after the first element
pub fn tail(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    let items = single_array("tail", args)?;
    Ok(sub_array(items, 1, items.len() as i64))
}

/// `slice(arr, begin, end?)`
pub fn slice(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    if !(2..=3).contains(&args.len()) {
        return Err(arg_error(format!(
            "slice() accepts 2 or 3 parameters, got={}",
            args.len()
        )));
    }
    let items = extract_array("slice", &args[0])?;

    let bound = |value: Option<&Value>, default: i64| match value {
        None => Ok(default),
        Some(Value::Integer(n)) => Ok(*n),
        Some(_) => Err(arg_error(
            "parameters 'begin' and 'end' of slice() must be integers!",
        )),
    };
    let begin = bound(args.get(1), 0)?;
    let end = bound(args.get(2), items.len() as i64)?;

    Ok(sub_array(items, begin, end))
}

/// `push(arr, x, ...)`: a copy of `arr` with the rest appended
pub fn push(_: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    let [first, rest @ ..] = args else {
        return Err(arg_error("push() accepts at least 2 parameters, got=0"));
    };
    if rest.is_empty() {
        return Err(arg_error("push() accepts at least 2 parameters, got=1"));
    }
    let items = extract_array("push", first)?;

    let mut result = Vec::with_capacity(items.len() + rest.len());
    result.extend_from_slice(items.as_slice());
    result.extend_from_slice(rest);
    Ok(Value::array(result))
}

/// Shared shape check for `map(arr, fn)` and `filter(arr, fn)`
fn array_and_callback<'a>(
    name: &str,
    args: &'a [Value],
) -> Result<(&'a ValueArray, &'a Value), RuntimeError> {
    let [array, func] = args else {
        return Err(arg_error(format!(
            "{}() accepts 2 parameters, got={}",
            name,
            args.len()
        )));
    };
    Ok((extract_array(name, array)?, extract_callable(func)?))
}

/// `map(arr, fn)`
pub fn map(interp: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    let (items, func) = array_and_callback("map", args)?;

    let mut result = Vec::with_capacity(items.len());
    for item in items.iter() {
        result.push(interp.apply_function(func, vec![item.clone()])?);
    }
    Ok(Value::array(result))
}

/// `filter(arr, fn)`: keep elements whose predicate returns `true`
pub fn filter(interp: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    let (items, func) = array_and_callback("filter", args)?;

    let mut result = Vec::new();
    for item in items.iter() {
        match interp.apply_function(func, vec![item.clone()])? {
            Value::Boolean(true) => result.push(item.clone()),
            Value::Boolean(false) => {}
            other => {
                return Err(arg_error(format!(
                    "filter() predicate must return BOOLEAN, got={}",
                    other.type_tag()
                )))
            }
        }
    }
    Ok(Value::array(result))
}

/// `reduce(arr, fn, initial?)`: left fold over integers
pub fn reduce(interp: &mut Interpreter, args: &[Value]) -> Result<Value, RuntimeError> {
    if !(2..=3).contains(&args.len()) {
        return Err(arg_error(format!(
            "reduce() accepts 2 or 3 parameters, got={}",
            args.len()
        )));
    }
    let items = extract_array("reduce", &args[0])?;
    let func = extract_callable(&args[1])?;

    let (initial, rest) = match args.get(2) {
        Some(initial) => (initial, items.as_slice()),
        None => match items.as_slice().split_first() {
            Some((first, rest)) => (first, rest),
            None => {
                return Err(arg_error(
                    "If reduce() hasn't received initial value, provided array mustn't be empty",
                ))
            }
        },
    };

    let mut acc = match initial {
        Value::Integer(n) => *n,
        other => {
            return Err(arg_error(format!(
                "Unsupported type {} of initial value",
                other.type_tag()
            )))
        }
    };

    for item in rest {
        acc = match interp.apply_function(func, vec![Value::Integer(acc), item.clone()])? {
            Value::Integer(n) => n,
            other => {
                return Err(arg_error(format!(
                    "reduce() accumulator must be INTEGER, got={}",
                    other.type_tag()
                )))
            }
        };
    }
    Ok(Value::Integer(acc))
}
