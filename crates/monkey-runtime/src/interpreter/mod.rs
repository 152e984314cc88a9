//! Tree-walking interpreter
//!
//! Evaluation threads a [`Signal`] through `Result` so that `return` and
//! runtime errors unwind with `?`. A return signal stops at the nearest
//! function call; an error goes all the way to [`Interpreter::eval_program`],
//! where it becomes a [`Value::Error`].

mod expr;
mod stmt;

use crate::ast::{Expression, Program};
use crate::environment::{Env, Environment};
use crate::value::{RuntimeError, Value};

/// Default limit on nested user function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Deepest allowed nesting of user function calls
    pub max_call_depth: usize,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Non-local exit out of statement evaluation
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Signal {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Error(err)
    }
}

pub(crate) type EvalResult<T = Value> = Result<T, Signal>;

/// How a top-level evaluation ended
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Ran to the end; the value of the last statement
    Finished(Value),
    /// Stopped early by a top-level `return`
    Returned(Value),
    /// Stopped by a runtime error, carried as a [`Value::Error`]
    Failed(Value),
}

impl Completion {
    pub fn into_value(self) -> Value {
        match self {
            Completion::Finished(value) | Completion::Returned(value) | Completion::Failed(value) => {
                value
            }
        }
    }
}

fn complete(result: EvalResult) -> Completion {
    match result {
        Ok(value) => Completion::Finished(value),
        Err(Signal::Return(value)) => Completion::Returned(value),
        Err(Signal::Error(err)) => {
            tracing::debug!(error = %err, "evaluation failed");
            Completion::Failed(Value::Error(err.to_string()))
        }
    }
}

#[derive(Debug, Default)]
pub struct Interpreter {
    options: InterpreterOptions,
    depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Evaluate a program; the result is the value of its last statement
    pub fn eval_program(&mut self, program: &Program, env: &Env) -> Value {
        self.run_program(program, env).into_value()
    }

    /// Like [`Interpreter::eval_program`], keeping how the run ended
    pub fn run_program(&mut self, program: &Program, env: &Env) -> Completion {
        self.depth = 0;
        complete(self.eval_statements(&program.statements, env))
    }

    pub fn eval_expression(&mut self, expr: &Expression, env: &Env) -> Value {
        self.depth = 0;
        complete(self.eval_expr(expr, env)).into_value()
    }

    /// Call a function or built-in with already evaluated arguments.
    ///
    /// This is also the entry point built-ins use to call back into user code.
    pub fn apply_function(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Function(func) => {
                if args.len() != func.parameters.len() {
                    return Err(RuntimeError::WrongArgumentCount {
                        want: func.parameters.len(),
                        got: args.len(),
                    });
                }
                if self.depth >= self.options.max_call_depth {
                    return Err(RuntimeError::CallDepthExceeded(self.options.max_call_depth));
                }

                let env = Environment::enclosed(&func.env);
                {
                    let mut scope = env.borrow_mut();
                    for (param, arg) in func.parameters.iter().zip(args) {
                        scope.set(param.name.clone(), arg);
                    }
                }

                self.depth += 1;
                tracing::trace!(depth = self.depth, "calling function");
                let result = self.eval_block(&func.body, &env);
                self.depth -= 1;

                match result {
                    Ok(value) | Err(Signal::Return(value)) => Ok(value),
                    Err(Signal::Error(err)) => Err(err),
                }
            }
            Value::Builtin(builtin) => {
                tracing::trace!(name = builtin.name, "calling builtin");
                (builtin.func)(self, &args)
            }
            other => Err(RuntimeError::NotAFunction(other.type_tag())),
        }
    }
}
