//! AST dump command - output the canonical rendering or JSON

use anyhow::{anyhow, Result};
use monkey_runtime::parse_source;

use super::{read_source, report_diagnostics};

/// Dump the syntax tree of `file_path`
///
/// Without `json`, prints one canonical line per top-level statement.
/// Nothing is printed if the file has syntax errors.
pub fn run(file_path: &str, json: bool) -> Result<()> {
    let source = read_source(file_path)?;
    let (program, diagnostics) = parse_source(&source);

    if !diagnostics.is_empty() {
        let diagnostics: Vec<_> = diagnostics
            .into_iter()
            .map(|d| d.with_file(file_path))
            .collect();
        report_diagnostics(&diagnostics, json)?;
        return Err(anyhow!(
            "{} has {} syntax error(s)",
            file_path,
            diagnostics.len()
        ));
    }

    if json {
        println!("{}", program.to_json()?);
    } else {
        for stmt in &program.statements {
            println!("{}", stmt);
        }
    }

    Ok(())
}
