//! REPL core logic (UI-agnostic)

use crate::ast::Statement;
use crate::diagnostic::Diagnostic;
use crate::environment::{Env, Environment};
use crate::interpreter::{Completion, Interpreter, InterpreterOptions};
use crate::lexer::Lexer;
use crate::parser::parse_source;
use crate::token::Token;
use crate::value::Value;

pub struct ReplResult {
    /// `None` for lines that only bind names, or that failed to parse
    pub value: Option<Value>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReplResult {
    pub fn is_error(&self) -> bool {
        !self.diagnostics.is_empty() || self.value.as_ref().is_some_and(Value::is_error)
    }
}

/// REPL state
///
/// Bindings persist across lines. A line that fails, whether at parse time
/// or at run time, leaves earlier bindings intact.
pub struct ReplCore {
    interpreter: Interpreter,
    env: Env,
}

impl ReplCore {
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self {
            interpreter: Interpreter::with_options(options),
            env: Environment::new(),
        }
    }

    pub fn eval_line(&mut self, input: &str) -> ReplResult {
        let (program, diagnostics) = parse_source(input);
        if !diagnostics.is_empty() {
            return ReplResult {
                value: None,
                diagnostics,
            };
        }

        let value = match self.interpreter.run_program(&program, &self.env) {
            Completion::Finished(_)
                if matches!(program.statements.last(), None | Some(Statement::Let(_))) =>
            {
                None
            }
            completion => Some(completion.into_value()),
        };

        ReplResult {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize a line without evaluating it
    pub fn tokens(&self, input: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        Lexer::new(input).tokenize()
    }

    /// Global bindings, sorted by name
    pub fn bindings(&self) -> Vec<(String, Value)> {
        let env = self.env.borrow();
        let bindings = env
            .names()
            .into_iter()
            .filter_map(|name| env.get(&name).map(|value| (name, value)))
            .collect();
        bindings
    }

    /// Drop every binding
    pub fn reset(&mut self) {
        self.env = Environment::new();
    }
}

impl Default for ReplCore {
    fn default() -> Self {
        Self::new()
    }
}
