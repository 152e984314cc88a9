//! Lexical analysis
//!
//! Turns source text into tokens one at a time. The lexer never fails: bad
//! input becomes an `Illegal` token plus a diagnostic, and the parser decides
//! what to make of it.

mod literals;

use crate::diagnostic::{error_codes, Diagnostic};
use crate::span::Span;
use crate::token::{Token, TokenKind, TokenSource};

pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    start_pos: usize,
    start_line: usize,
    start_column: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            start_pos: 0,
            start_line: 1,
            start_column: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the whole input. The returned vector always ends with one `Eof`.
    pub fn tokenize(&mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, self.take_diagnostics())
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Scan the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        self.start_pos = self.current;
        self.start_line = self.line;
        self.start_column = self.column;

        if self.is_at_end() {
            return self.make_token(TokenKind::Eof, "");
        }

        let c = self.advance();
        match c {
            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::Eq, "==")
                } else {
                    self.make_token(TokenKind::Assign, "=")
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::NotEq, "!=")
                } else {
                    self.make_token(TokenKind::Bang, "!")
                }
            }
            '+' => self.make_token(TokenKind::Plus, "+"),
            '-' => self.make_token(TokenKind::Minus, "-"),
            '*' => self.make_token(TokenKind::Asterisk, "*"),
            '/' => self.make_token(TokenKind::Slash, "/"),
            '<' => self.make_token(TokenKind::Lt, "<"),
            '>' => self.make_token(TokenKind::Gt, ">"),
            ',' => self.make_token(TokenKind::Comma, ","),
            ';' => self.make_token(TokenKind::Semicolon, ";"),
            ':' => self.make_token(TokenKind::Colon, ":"),
            '(' => self.make_token(TokenKind::LParen, "("),
            ')' => self.make_token(TokenKind::RParen, ")"),
            '{' => self.make_token(TokenKind::LBrace, "{"),
            '}' => self.make_token(TokenKind::RBrace, "}"),
            '[' => self.make_token(TokenKind::LBracket, "["),
            ']' => self.make_token(TokenKind::RBracket, "]"),
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_ident_start(c) => self.identifier(),
            c => self.illegal(
                error_codes::ILLEGAL_CHARACTER,
                format!("illegal character '{}'", c),
                c.to_string(),
            ),
        }
    }

    /// Skip whitespace and `//` line comments
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    // === Character navigation ===

    pub(super) fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    pub(super) fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    pub(super) fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    // === Token creation ===

    fn span(&self) -> Span {
        Span::new(
            self.start_pos,
            self.current,
            self.start_line,
            self.start_column,
        )
    }

    pub(super) fn make_token(&self, kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, self.span())
    }

    pub(super) fn lexeme(&self) -> String {
        self.chars[self.start_pos..self.current].iter().collect()
    }

    /// Record a lexical error and return an `Illegal` token carrying `lexeme`
    ///
    /// Snippets are left empty; callers holding the source fill them in with
    /// [`attach_source`](crate::diagnostic::attach_source).
    pub(super) fn illegal(&mut self, code: &str, message: String, lexeme: String) -> Token {
        self.diagnostics.push(
            Diagnostic::error_with_code(code, message, self.span()).with_label("lexer error"),
        );
        Token::new(TokenKind::Illegal, lexeme, self.span())
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

pub(super) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
