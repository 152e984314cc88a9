//! Token dump command

use anyhow::{anyhow, Result};
use monkey_runtime::{attach_source, Lexer, Token};

use super::{read_source, report_diagnostics};

/// One token per line, `{Type:X Literal:y}` style
pub(crate) fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }
    out
}

/// Print the token stream of `file_path`, ending with the EOF token
///
/// Lexical errors are reported after the dump and fail the command.
pub fn run(file_path: &str, json: bool) -> Result<()> {
    let source = read_source(file_path)?;
    let (tokens, diagnostics) = Lexer::new(&source).tokenize();

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        print!("{}", format_tokens(&tokens));
    }

    if diagnostics.is_empty() {
        return Ok(());
    }
    let diagnostics: Vec<_> = attach_source(diagnostics, &source)
        .into_iter()
        .map(|d| d.with_file(file_path))
        .collect();
    report_diagnostics(&diagnostics, json)?;
    Err(anyhow!("{} has {} lexical error(s)", file_path, diagnostics.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_tokens() {
        let (tokens, _) = Lexer::new("let x = 5;").tokenize();
        insta::assert_snapshot!(format_tokens(&tokens), @r"
        {Type:LET Literal:let}
        {Type:IDENT Literal:x}
        {Type:= Literal:=}
        {Type:INT Literal:5}
        {Type:; Literal:;}
        {Type:EOF Literal:}
        ");
    }

    #[test]
    fn test_tokens_dump_invalid_character() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "let x = @;").unwrap();
        assert!(run(temp_file.path().to_str().unwrap(), false).is_err());
    }

    #[test]
    fn test_tokens_dump_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "1 + 2").unwrap();
        assert!(run(temp_file.path().to_str().unwrap(), true).is_ok());
    }
}
