//! Token types and the token-stream interface consumed by the parser

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text; for string literals, the unescaped contents
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Type:{} Literal:{}}}", self.kind, self.lexeme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A character the lexer could not classify
    Illegal,
    Eof,

    // Literals
    Ident,
    Int,
    String,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// Reclassify an identifier as a keyword if it is one
    pub fn is_keyword(s: &str) -> Option<TokenKind> {
        match s {
            "fn" => Some(TokenKind::Function),
            "let" => Some(TokenKind::Let),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// Name used in diagnostics and token dumps
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pull-based token stream.
///
/// Implementations must keep returning an `Eof` token once input is exhausted.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Adapter that replays an already tokenized sequence.
#[derive(Debug, Clone)]
pub struct Tokens {
    iter: std::vec::IntoIter<Token>,
    last_span: Span,
}

impl Tokens {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            iter: tokens.into_iter(),
            last_span: Span::dummy(),
        }
    }
}

impl From<Vec<Token>> for Tokens {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl TokenSource for Tokens {
    fn next_token(&mut self) -> Token {
        match self.iter.next() {
            Some(token) => {
                self.last_span = token.span;
                token
            }
            None => Token::eof(Span::new(
                self.last_span.end,
                self.last_span.end,
                self.last_span.line,
                self.last_span.column,
            )),
        }
    }
}
