//! Expression parsing (Pratt)
//!
//! `parse_expression` dispatches on the current token to a prefix rule, then
//! keeps folding infix rules into the left operand while the next token binds
//! tighter than the caller's precedence. Equal precedence stops the loop,
//! which makes chains of the same operator left-associative.
//!
//! Prefix and infix rules leave `self.height` at the tallest operand they
//! parsed (zero for leaves); `parse_expression` adds a level per node and
//! rejects trees taller than [`MAX_NESTING`](super::MAX_NESTING).

use std::rc::Rc;

use crate::ast::{
    ArrayLiteral, CallExpression, Expression, FunctionLiteral, Identifier, IfExpression,
    IndexExpression, InfixExpression, InfixOperator, ObjectLiteral, PrefixExpression,
    PrefixOperator,
};
use crate::diagnostic::error_codes;
use crate::parser::{ParseResult, Parser, Precedence};
use crate::stack::ensure_sufficient_stack;
use crate::token::{TokenKind, TokenSource};

impl<S: TokenSource> Parser<S> {
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        ensure_sufficient_stack(|| -> ParseResult<Expression> {
            self.nesting += 1;
            let result = self.parse_nested(precedence);
            self.nesting -= 1;
            result
        })
    }

    fn parse_nested(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        self.check_nesting(self.nesting)?;

        self.height = 0;
        let mut left = self.parse_prefix()?;
        let mut height = self.height + 1;
        self.check_nesting(height)?;

        while precedence < Precedence::of(self.peek.kind) {
            self.advance();
            self.height = 0;
            left = self.parse_infix(left)?;
            height = height.max(self.height) + 1;
            self.check_nesting(height)?;
        }

        self.height = height;
        Ok(left)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        match self.current.kind {
            TokenKind::Ident => Ok(Expression::Identifier(Identifier::new(
                self.current.lexeme.clone(),
            ))),
            TokenKind::Int => self.parse_integer(),
            TokenKind::String => Ok(Expression::String(self.current.lexeme.clone())),
            TokenKind::True => Ok(Expression::Boolean(true)),
            TokenKind::False => Ok(Expression::Boolean(false)),
            TokenKind::Bang => self.parse_prefix_expression(PrefixOperator::Bang),
            TokenKind::Minus => self.parse_prefix_expression(PrefixOperator::Minus),
            TokenKind::LParen => self.parse_group(),
            TokenKind::If => self.parse_if(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => {
                let elements = self.parse_expression_list(TokenKind::RBracket)?;
                Ok(Expression::Array(ArrayLiteral { elements }))
            }
            TokenKind::LBrace => self.parse_object_literal(),
            kind => {
                let span = self.current.span;
                self.error(
                    error_codes::NO_PREFIX_RULE,
                    format!("no prefix parse function for {} found", kind),
                    span,
                );
                Err(())
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> ParseResult<Expression> {
        match self.current.kind {
            TokenKind::LParen => {
                let arguments = self.parse_expression_list(TokenKind::RParen)?;
                Ok(Expression::Call(CallExpression {
                    callee: Box::new(left),
                    arguments,
                }))
            }
            TokenKind::LBracket => {
                self.advance();
                let index = self.parse_expression(Precedence::Lowest)?;
                self.expect_peek(TokenKind::RBracket)?;
                Ok(Expression::Index(IndexExpression {
                    left: Box::new(left),
                    index: Box::new(index),
                }))
            }
            kind => {
                let Some(operator) = infix_operator(kind) else {
                    let span = self.current.span;
                    self.error(
                        error_codes::UNEXPECTED_TOKEN,
                        format!("no infix parse function for {} found", kind),
                        span,
                    );
                    return Err(());
                };
                let precedence = Precedence::of(kind);
                self.advance();
                let right = self.parse_expression(precedence)?;
                Ok(Expression::Infix(InfixExpression {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                }))
            }
        }
    }

    fn parse_integer(&mut self) -> ParseResult<Expression> {
        match self.current.lexeme.parse::<i64>() {
            Ok(value) => Ok(Expression::Integer(value)),
            Err(_) => {
                let message = format!("could not parse {} as integer", self.current.lexeme);
                let span = self.current.span;
                self.error(error_codes::INVALID_INTEGER, message, span);
                Err(())
            }
        }
    }

    fn parse_prefix_expression(&mut self, operator: PrefixOperator) -> ParseResult<Expression> {
        self.advance();
        let operand = self.parse_expression(Precedence::Prefix)?;
        Ok(Expression::Prefix(PrefixExpression {
            operator,
            operand: Box::new(operand),
        }))
    }

    fn parse_group(&mut self) -> ParseResult<Expression> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expr)
    }

    /// `if (<cond>) { ... } else { ... }`
    fn parse_if(&mut self) -> ParseResult<Expression> {
        self.expect_peek(TokenKind::LParen)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let mut height = self.height;
        let consequence = self.parse_block()?;
        height = height.max(self.height);

        let alternative = if self.peek_is(TokenKind::Else) {
            self.advance();
            self.expect_peek(TokenKind::LBrace)?;
            let block = self.parse_block()?;
            height = height.max(self.height);
            Some(block)
        } else {
            None
        };
        self.height = height;

        Ok(Expression::If(IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// `fn(<ident>, ...) { ... }`
    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        self.height = 0;
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        Ok(Expression::Function(FunctionLiteral {
            parameters,
            body: Rc::new(body),
        }))
    }

    fn parse_function_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(Identifier::new(self.current.lexeme.clone()));

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(Identifier::new(self.current.lexeme.clone()));
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }

    /// Comma-separated expressions up to `end`; shared by calls and array literals
    fn parse_expression_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expression>> {
        let mut list = Vec::new();
        self.height = 0;

        if self.peek_is(end) {
            self.advance();
            return Ok(list);
        }

        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);
        let mut height = self.height;

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
            height = height.max(self.height);
        }

        self.expect_peek(end)?;
        self.height = height;
        Ok(list)
    }

    /// `{ <key>: <value>, ... }`, trailing comma allowed
    fn parse_object_literal(&mut self) -> ParseResult<Expression> {
        let mut pairs = Vec::new();
        let mut height = 0;

        while !self.peek_is(TokenKind::RBrace) {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;
            height = height.max(self.height);
            self.expect_peek(TokenKind::Colon)?;
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            height = height.max(self.height);
            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }

        self.expect_peek(TokenKind::RBrace)?;
        self.height = height;
        Ok(Expression::Object(ObjectLiteral { pairs }))
    }
}

fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    Some(match kind {
        TokenKind::Plus => InfixOperator::Plus,
        TokenKind::Minus => InfixOperator::Minus,
        TokenKind::Asterisk => InfixOperator::Multiply,
        TokenKind::Slash => InfixOperator::Divide,
        TokenKind::Lt => InfixOperator::Less,
        TokenKind::Gt => InfixOperator::Greater,
        TokenKind::Eq => InfixOperator::Equal,
        TokenKind::NotEq => InfixOperator::NotEqual,
        _ => return None,
    })
}
