pub mod ast;
pub mod repl;
pub mod run;
pub mod tokens;

use anyhow::{Context, Result};
use monkey_runtime::Diagnostic;
use std::fs;

/// Read a source file, naming it in the error
pub(crate) fn read_source(file_path: &str) -> Result<String> {
    fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))
}

/// Print diagnostics to stderr, human readable or one JSON document each
pub(crate) fn report_diagnostics(diagnostics: &[Diagnostic], json: bool) -> Result<()> {
    for diag in diagnostics {
        if json {
            eprintln!("{}", diag.to_json_string()?);
        } else {
            eprint!("{}", diag.to_human_string());
        }
    }
    Ok(())
}
