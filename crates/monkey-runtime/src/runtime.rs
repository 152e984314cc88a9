//! Monkey runtime API for embedding

use std::cell::RefCell;

use crate::diagnostic::Diagnostic;
use crate::environment::{Env, Environment};
use crate::interpreter::{Interpreter, InterpreterOptions};
use crate::parser::parse_source;
use crate::value::Value;

/// Result type for runtime operations
///
/// `Err` carries syntax diagnostics. Runtime failures are not `Err`: they
/// come back as `Ok(Value::Error(..))`, because errors are values in the
/// language.
pub type RuntimeResult<T> = Result<T, Vec<Diagnostic>>;

/// A runtime instance with one long-lived global environment
///
/// # Examples
///
/// ```
/// use monkey_runtime::{Monkey, Value};
///
/// let runtime = Monkey::new();
/// runtime.eval("let double = fn(x) { x * 2 };").unwrap();
/// assert_eq!(runtime.eval("double(21)").unwrap(), Value::Integer(42));
/// ```
pub struct Monkey {
    interpreter: RefCell<Interpreter>,
    globals: Env,
}

impl Monkey {
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self {
            interpreter: RefCell::new(Interpreter::with_options(options)),
            globals: Environment::new(),
        }
    }

    /// Evaluate source against the global environment
    pub fn eval(&self, source: &str) -> RuntimeResult<Value> {
        self.eval_named(source, "<input>")
    }

    /// Like [`Monkey::eval`], with `file` recorded in any diagnostics
    pub fn eval_named(&self, source: &str, file: &str) -> RuntimeResult<Value> {
        let (program, diagnostics) = parse_source(source);
        if !diagnostics.is_empty() {
            return Err(diagnostics
                .into_iter()
                .map(|diag| diag.with_file(file))
                .collect());
        }

        tracing::debug!(file, statements = program.statements.len(), "evaluating");
        let value = self
            .interpreter
            .borrow_mut()
            .eval_program(&program, &self.globals);
        Ok(value)
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name)
    }

    pub fn set_global(&self, name: &str, value: Value) {
        self.globals.borrow_mut().set(name, value);
    }
}

impl Default for Monkey {
    fn default() -> Self {
        Self::new()
    }
}
