//! Statement parsing
//!
//! Every routine here starts with `current` on the statement's first token
//! and returns with `current` on its last token (the `;` when present).

use crate::ast::{ExpressionStatement, Identifier, LetStatement, ReturnStatement, Statement};
use crate::parser::{ParseResult, Parser, Precedence};
use crate::token::{TokenKind, TokenSource};

impl<S: TokenSource> Parser<S> {
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let <ident> = <expr>;`
    fn parse_let_statement(&mut self) -> ParseResult<Statement> {
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::new(self.current.lexeme.clone());

        self.expect_peek(TokenKind::Assign)?;
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Let(LetStatement { name, value }))
    }

    /// `return <expr>;`
    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Return(ReturnStatement { value }))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Expression(ExpressionStatement { expression }))
    }

    /// Semicolons are optional terminators
    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
    }
}
