//! Parsing (tokens to AST)
//!
//! Recursive descent for statements and Pratt (operator-precedence) parsing
//! for expressions. The parser holds exactly two tokens, `current` and `peek`,
//! and pulls from its [`TokenSource`] on demand.
//!
//! Syntax errors never abort a parse. Each one is recorded as a
//! [`Diagnostic`], the parser skips ahead to the next statement boundary and
//! carries on, so callers always get a best-effort [`Program`].

mod expr;
mod stmt;

use crate::ast::{BlockStatement, Program};
use crate::diagnostic::{attach_source, error_codes, Diagnostic};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind, TokenSource};

/// Binding power of infix operators, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)` `a[i]`
    Call,
}

impl Precedence {
    pub(crate) fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen | TokenKind::LBracket => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

/// Errors are recorded in `Parser::diagnostics`; the `Err` only unwinds.
type ParseResult<T> = Result<T, ()>;

/// Deepest expression tree the parser will build
pub const MAX_NESTING: usize = 1000;

pub struct Parser<S: TokenSource> {
    source: S,
    current: Token,
    peek: Token,
    diagnostics: Vec<Diagnostic>,
    /// Active `parse_expression` calls
    nesting: usize,
    /// Height of the subtree most recently parsed; see `parse_expression`
    height: usize,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(mut source: S) -> Self {
        let current = source.next_token();
        let peek = if current.is(TokenKind::Eof) {
            current.clone()
        } else {
            source.next_token()
        };
        Self {
            source,
            current,
            peek,
            diagnostics: Vec::new(),
            nesting: 0,
            height: 0,
        }
    }

    /// Parse to end of input
    pub fn parse(&mut self) -> (Program, Vec<Diagnostic>) {
        let mut statements = Vec::new();

        while !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(()) => self.synchronize(),
            }
            self.advance();
        }

        let diagnostics = std::mem::take(&mut self.diagnostics);
        tracing::debug!(
            statements = statements.len(),
            errors = diagnostics.len(),
            "parsed program"
        );
        (Program::new(statements), diagnostics)
    }

    /// Parse `{ statements }`. Expects `current` on `{`, leaves it on `}`.
    pub(super) fn parse_block(&mut self) -> ParseResult<BlockStatement> {
        let mut statements = Vec::new();
        let mut height = 0;
        self.advance();

        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::Eof) {
                let span = self.current.span;
                self.error(
                    error_codes::UNEXPECTED_TOKEN,
                    "expected next token to be }, got EOF instead",
                    span,
                );
                return Err(());
            }
            match self.parse_statement() {
                Ok(stmt) => {
                    height = height.max(self.height);
                    statements.push(stmt);
                    self.advance();
                }
                Err(()) => {
                    self.synchronize();
                    if !self.current_is(TokenKind::RBrace) {
                        self.advance();
                    }
                }
            }
        }

        self.height = height + 1;
        Ok(BlockStatement { statements })
    }

    // === Token navigation ===

    /// Shift `peek` into `current`. Never pulls past `Eof`.
    fn advance(&mut self) {
        if self.current_is(TokenKind::Eof) {
            return;
        }
        let next = if self.peek_is(TokenKind::Eof) {
            self.peek.clone()
        } else {
            self.source.next_token()
        };
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance if `peek` is `kind`, otherwise record an error
    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek_is(kind) {
            self.advance();
            Ok(())
        } else {
            let message = format!(
                "expected next token to be {}, got {} instead",
                kind, self.peek.kind
            );
            let span = self.peek.span;
            self.error(error_codes::UNEXPECTED_TOKEN, message, span);
            Err(())
        }
    }

    fn error(&mut self, code: &str, message: impl Into<String>, span: Span) {
        self.diagnostics.push(
            Diagnostic::error_with_code(code, message, span).with_label("syntax error"),
        );
    }

    fn check_nesting(&mut self, depth: usize) -> ParseResult<()> {
        if depth <= MAX_NESTING {
            return Ok(());
        }
        let diagnostic = Diagnostic::error_with_code(
            error_codes::NESTED_TOO_DEEPLY,
            format!("expression nested too deeply (limit is {})", MAX_NESTING),
            self.current.span,
        )
        .with_label("syntax error")
        .with_help("bind inner parts to names with `let`");
        self.diagnostics.push(diagnostic);
        Err(())
    }

    /// Skip to a statement boundary after an error
    fn synchronize(&mut self) {
        while !matches!(
            self.current.kind,
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) && !matches!(
            self.peek.kind,
            TokenKind::Let | TokenKind::Return | TokenKind::RBrace
        ) {
            self.advance();
        }
    }
}

/// Lex and parse `source`, merging lexer and parser diagnostics in source order
pub fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(source);
    let (program, parse_diagnostics) = Parser::new(&mut lexer).parse();

    let mut diagnostics = lexer.take_diagnostics();
    diagnostics.extend(parse_diagnostics);
    diagnostics.sort_by_key(|d| (d.line, d.column));

    (program, attach_source(diagnostics, source))
}
