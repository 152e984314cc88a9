//! Syntax diagnostics
//!
//! Lexer and parser problems are collected as `Diagnostic` values rather than
//! aborting, so a caller always gets a best-effort program plus the full list.

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message with its source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// Error code (e.g. "MK1001")
    pub code: String,
    pub message: String,
    /// File path, `<input>` when evaluating a string
    pub file: String,
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
    pub length: usize,
    /// Source line the diagnostic points into
    pub snippet: String,
    /// Short label printed after the carets
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error_with_code(
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            code: code.into(),
            message: message.into(),
            file: "<input>".to_string(),
            line: span.line,
            column: span.column,
            length: span.len(),
            snippet: String::new(),
            label: String::new(),
            help: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Fill in the snippet from the source lines if it is still empty
    fn with_line_from(mut self, lines: &[&str]) -> Self {
        if self.snippet.is_empty() {
            if let Some(line) = lines.get(self.line.saturating_sub(1)) {
                self.snippet = line.to_string();
            }
        }
        self
    }

    /// Format as human-readable string
    pub fn to_human_string(&self) -> String {
        let mut output = format!("{}[{}]: {}\n", self.level, self.code, self.message);
        output.push_str(&format!("  --> {}:{}:{}\n", self.file, self.line, self.column));

        if !self.snippet.is_empty() {
            output.push_str("   |\n");
            output.push_str(&format!("{:>2} | {}\n", self.line, self.snippet));
            let padding = " ".repeat(self.column.saturating_sub(1));
            let carets = "^".repeat(self.length.max(1));
            output.push_str(&format!("   | {}{}", padding, carets));
            if !self.label.is_empty() {
                output.push_str(&format!(" {}", self.label));
            }
            output.push('\n');
        }

        if let Some(help) = &self.help {
            output.push_str(&format!("   = help: {}\n", help));
        }

        output
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Fill in each diagnostic's snippet from the line of `source` it points at
pub fn attach_source(diagnostics: Vec<Diagnostic>, source: &str) -> Vec<Diagnostic> {
    let lines: Vec<&str> = source.lines().collect();
    diagnostics
        .into_iter()
        .map(|diag| diag.with_line_from(&lines))
        .collect()
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Error code registry
pub mod error_codes {
    // MK0xxx - Lexical errors
    pub const ILLEGAL_CHARACTER: &str = "MK0001";
    pub const UNTERMINATED_STRING: &str = "MK0002";
    pub const INVALID_ESCAPE: &str = "MK0003";

    // MK1xxx - Syntax errors
    pub const UNEXPECTED_TOKEN: &str = "MK1001";
    pub const NO_PREFIX_RULE: &str = "MK1002";
    pub const INVALID_INTEGER: &str = "MK1003";
    pub const NESTED_TOO_DEEPLY: &str = "MK1004";
}
