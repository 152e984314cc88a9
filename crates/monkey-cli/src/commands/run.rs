//! Run command - execute Monkey source files

use anyhow::{anyhow, Result};
use monkey_runtime::{Monkey, Value};

use super::{read_source, report_diagnostics};
use crate::config::Config;

/// Run a Monkey source file
///
/// Prints the program's value to stdout unless it is null. Syntax errors and
/// runtime errors go to stderr and fail the command.
pub fn run(file_path: &str, config: &Config) -> Result<()> {
    let source = read_source(file_path)?;

    let runtime = Monkey::with_options(config.interpreter_options());
    match runtime.eval_named(&source, file_path) {
        Ok(Value::Null) => Ok(()),
        Ok(value @ Value::Error(_)) => {
            eprintln!("{}", value);
            Err(anyhow!("{} failed with a runtime error", file_path))
        }
        Ok(value) => {
            println!("{}", value);
            Ok(())
        }
        Err(diagnostics) => {
            report_diagnostics(&diagnostics, false)?;
            Err(anyhow!(
                "{} has {} syntax error(s)",
                file_path,
                diagnostics.len()
            ))
        }
    }
}
