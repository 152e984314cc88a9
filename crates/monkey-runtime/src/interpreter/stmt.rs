//! Statement evaluation

use crate::ast::{BlockStatement, Statement};
use crate::environment::Env;
use crate::interpreter::{EvalResult, Interpreter, Signal};
use crate::value::Value;

impl Interpreter {
    /// Run statements in order, stopping at the first signal
    pub(super) fn eval_statements(&mut self, statements: &[Statement], env: &Env) -> EvalResult {
        let mut result = Value::Null;
        for stmt in statements {
            result = self.eval_statement(stmt, env)?;
        }
        Ok(result)
    }

    /// Blocks share the enclosing environment; only calls open a new scope
    pub(super) fn eval_block(&mut self, block: &BlockStatement, env: &Env) -> EvalResult {
        self.eval_statements(&block.statements, env)
    }

    fn eval_statement(&mut self, stmt: &Statement, env: &Env) -> EvalResult {
        match stmt {
            Statement::Let(stmt) => {
                let value = self.eval_expr(&stmt.value, env)?;
                env.borrow_mut().set(stmt.name.name.clone(), value);
                Ok(Value::Null)
            }
            Statement::Return(stmt) => {
                let value = self.eval_expr(&stmt.value, env)?;
                Err(Signal::Return(value))
            }
            Statement::Expression(stmt) => self.eval_expr(&stmt.expression, env),
        }
    }
}
