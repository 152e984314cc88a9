//! Monkey Runtime - Core language implementation
//!
//! This library provides the Monkey language runtime:
//! - Lexical analysis and Pratt parsing
//! - Tree-walking evaluation with lexically scoped closures
//! - Built-in functions
//! - An embedding API and a UI-agnostic REPL core

/// Monkey runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ast;
pub mod diagnostic;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod span;
pub mod stdlib;
pub mod token;
pub mod value;

mod stack;

pub use ast::Program;
pub use diagnostic::{attach_source, error_codes, Diagnostic, DiagnosticLevel};
pub use environment::{Env, Environment};
pub use interpreter::{Completion, Interpreter, InterpreterOptions, DEFAULT_MAX_CALL_DEPTH};
pub use lexer::Lexer;
pub use parser::{parse_source, Parser};
pub use repl::{ReplCore, ReplResult};
pub use runtime::{Monkey, RuntimeResult};
pub use span::Span;
pub use token::{Token, TokenKind, TokenSource, Tokens};
pub use value::{HashKey, ObjectType, RuntimeError, Value};
