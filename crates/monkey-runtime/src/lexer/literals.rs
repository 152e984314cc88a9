//! Literal scanning for the lexer

use crate::diagnostic::error_codes;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Scan a string literal. The opening quote has been consumed.
    pub(super) fn string(&mut self) -> Token {
        let mut value = String::new();
        let mut bad_escape = None;

        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() != '\\' {
                value.push(self.advance());
                continue;
            }

            self.advance(); // backslash
            if self.is_at_end() {
                break;
            }
            match self.advance() {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                'r' => value.push('\r'),
                '\\' => value.push('\\'),
                '"' => value.push('"'),
                other => {
                    // Keep scanning so the rest of the string isn't re-lexed as code
                    bad_escape.get_or_insert(other);
                }
            }
        }

        if self.is_at_end() {
            let lexeme = self.lexeme();
            return self.illegal(
                error_codes::UNTERMINATED_STRING,
                "unterminated string literal".to_string(),
                lexeme,
            );
        }

        self.advance(); // closing quote

        if let Some(c) = bad_escape {
            let lexeme = self.lexeme();
            return self.illegal(
                error_codes::INVALID_ESCAPE,
                format!("invalid escape sequence '\\{}'", c),
                lexeme,
            );
        }

        self.make_token(TokenKind::String, &value)
    }

    /// Scan an integer literal. Range checking is left to the parser.
    pub(super) fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        let lexeme = self.lexeme();
        self.make_token(TokenKind::Int, &lexeme)
    }

    /// Scan an identifier or keyword
    pub(super) fn identifier(&mut self) -> Token {
        while super::is_ident_start(self.peek()) || self.peek().is_ascii_digit() {
            self.advance();
        }
        let lexeme = self.lexeme();
        let kind = TokenKind::is_keyword(&lexeme).unwrap_or(TokenKind::Ident);
        self.make_token(kind, &lexeme)
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostic::error_codes;
    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn test_string_escapes() {
        let (tokens, diagnostics) = Lexer::new(r#""a\n\"b\"\\""#).tokenize();
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "a\n\"b\"\\");
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diagnostics) = Lexer::new(r#""never closed"#).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
        assert_eq!(diagnostics[0].code, error_codes::UNTERMINATED_STRING);
    }

    #[test]
    fn test_invalid_escape() {
        let (tokens, diagnostics) = Lexer::new(r#""\q" 1"#).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].kind, TokenKind::Int);
        assert_eq!(diagnostics[0].code, error_codes::INVALID_ESCAPE);
    }

    #[test]
    fn test_identifiers_and_keywords() {
        let (tokens, _) = Lexer::new("fn let_me x1 _tmp if").tokenize();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Function,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::If,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_integer_lexeme() {
        let (tokens, _) = Lexer::new("12345").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].lexeme, "12345");
    }
}
