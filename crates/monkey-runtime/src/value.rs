//! Runtime values
//!
//! Every value the interpreter produces is a [`Value`]. Aggregates are
//! reference counted: cloning a value is a refcount bump, and arrays and
//! objects are never mutated in place once built.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::ast::{quote, BlockStatement, Identifier, InfixOperator, PrefixOperator};
use crate::environment::Env;
use crate::interpreter::Interpreter;

/// Type tag reported in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Object,
    Function,
    Builtin,
    Error,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::String => "STRING",
            ObjectType::Array => "ARRAY",
            ObjectType::Object => "OBJECT",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::Error => "ERROR",
        })
    }
}

/// Immutable shared array. Cheap to clone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueArray(Rc<Vec<Value>>);

impl ValueArray {
    pub fn from_vec(items: Vec<Value>) -> Self {
        ValueArray(Rc::new(items))
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Identity comparison used by `==`
    pub fn ptr_eq(&self, other: &ValueArray) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Key of an object entry
///
/// Built from the exact content of a hashable value, so two keys are equal
/// exactly when the values they came from are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
}

/// Immutable shared object. Each entry keeps the original key value for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueMap(Rc<HashMap<HashKey, (Value, Value)>>);

impl ValueMap {
    pub fn from_entries(entries: HashMap<HashKey, (Value, Value)>) -> Self {
        ValueMap(Rc::new(entries))
    }

    pub fn get(&self, key: &HashKey) -> Option<&Value> {
        self.0.get(key).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries ordered by key, for stable output
    pub fn sorted_entries(&self) -> Vec<(&Value, &Value)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, (k, v))| (k, v)).collect()
    }

    pub fn ptr_eq(&self, other: &ValueMap) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A closure: parameters and body plus the environment it was created in
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
    pub env: Env,
}

impl fmt::Debug for Function {
    // The captured environment may contain this function
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Native function signature
///
/// Built-ins get the interpreter so they can call back into user functions.
pub type BuiltinFn = fn(&mut Interpreter, &[Value]) -> Result<Value, RuntimeError>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

#[derive(Clone, Debug)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    String(Rc<str>),
    Array(ValueArray),
    Object(ValueMap),
    Function(Rc<Function>),
    Builtin(Builtin),
    /// Evaluation failure surfaced to the caller
    Error(String),
}

impl Value {
    pub fn string(value: impl AsRef<str>) -> Self {
        Value::String(Rc::from(value.as_ref()))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(ValueArray::from_vec(items))
    }

    pub fn type_tag(&self) -> ObjectType {
        match self {
            Value::Integer(_) => ObjectType::Integer,
            Value::Boolean(_) => ObjectType::Boolean,
            Value::Null => ObjectType::Null,
            Value::String(_) => ObjectType::String,
            Value::Array(_) => ObjectType::Array,
            Value::Object(_) => ObjectType::Object,
            Value::Function(_) => ObjectType::Function,
            Value::Builtin(_) => ObjectType::Builtin,
            Value::Error(_) => ObjectType::Error,
        }
    }

    /// Only `false` and `null` are falsy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn hash_key(&self) -> Result<HashKey, RuntimeError> {
        match self {
            Value::Integer(n) => Ok(HashKey::Integer(*n)),
            Value::Boolean(b) => Ok(HashKey::Boolean(*b)),
            Value::String(s) => Ok(HashKey::String(Rc::clone(s))),
            other => Err(RuntimeError::Unhashable(other.type_tag())),
        }
    }

    /// Equality as seen by `==` in the language.
    ///
    /// Scalars and strings compare by content; arrays, objects and functions
    /// compare by identity.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// Structural equality, for tests and embedders. See [`Value::equals`] for `==`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a.as_slice() == b.as_slice(),
            (Value::Object(a), Value::Object(b)) => a.0 == b.0,
            _ => self.equals(other),
        }
    }
}

/// Strings nested inside arrays and objects are quoted
fn write_nested(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => f.write_str(&quote(s)),
        other => write!(f, "{}", other),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_nested(f, item)?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.sorted_entries().into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_nested(f, key)?;
                    f.write_str(": ")?;
                    write_nested(f, value)?;
                }
                f.write_str("}")
            }
            Value::Function(func) => {
                f.write_str("fn(")?;
                for (i, param) in func.parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") {}", func.body)
            }
            Value::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            Value::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

/// Evaluation errors. The `Display` text becomes the message of a
/// [`Value::Error`] once the error reaches the top level.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("identifier not found: {name}")]
    IdentifierNotFound { name: String },

    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        operand: ObjectType,
    },

    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("not a function: {0}")]
    NotAFunction(ObjectType),

    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectType),

    #[error("Can't hash object of type {0}")]
    Unhashable(ObjectType),

    #[error("wrong number of arguments: want={want}, got={got}")]
    WrongArgumentCount { want: usize, got: usize },

    #[error("maximum call depth exceeded: {0}")]
    CallDepthExceeded(usize),

    /// Argument validation failure inside a built-in
    #[error("{0}")]
    Builtin(String),
}
