//! REPL command implementation

use anyhow::Result;
use monkey_runtime::{ReplCore, ReplResult, Value};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::tokens::format_tokens;
use crate::config::Config;

const PROMPT: &str = ">> ";

/// REPL meta commands, entered with a leading `:`
#[derive(Debug, PartialEq)]
enum Command {
    Quit,
    Reset,
    Vars,
    Help,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let name = line.strip_prefix(':')?;
        Some(match name.trim() {
            "quit" | "q" => Command::Quit,
            "reset" => Command::Reset,
            "vars" | "v" => Command::Vars,
            "help" | "h" => Command::Help,
            other => Command::Unknown(other.to_string()),
        })
    }
}

/// Run the interactive REPL
///
/// With `tokens_only`, each line is tokenized and the tokens are printed
/// instead of being evaluated.
pub fn run(tokens_only: bool, no_history: bool, config: &Config) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut repl = ReplCore::with_options(config.interpreter_options());

    let history_path = if no_history {
        None
    } else {
        config.get_history_path()
    };
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path); // Ignore errors if file doesn't exist
    }

    println!("Monkey v{} REPL", monkey_runtime::VERSION);
    println!("Type expressions or statements, or :quit to exit");
    println!("Commands: :quit (or :q), :reset, :vars, :help");
    println!();

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if let Some(command) = Command::parse(trimmed) {
                    match command {
                        Command::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        Command::Reset => {
                            repl.reset();
                            println!("REPL state reset");
                        }
                        Command::Vars => print_vars(&repl.bindings()),
                        Command::Help => print_help(),
                        Command::Unknown(name) => {
                            println!("Unknown command :{} (try :help)", name);
                        }
                    }
                    continue;
                }

                if tokens_only {
                    let (tokens, diagnostics) = repl.tokens(&line);
                    print!("{}", format_tokens(&tokens));
                    for diag in diagnostics {
                        println!("{}", format_error(&diag.message, config.no_color));
                    }
                    continue;
                }

                let result = repl.eval_line(&line);
                if let Some(output) = format_result(&result, config.no_color) {
                    println!("{}", output);
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                println!("Use :quit or :q to exit");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                tracing::error!(error = %err, "line editor failed");
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(err) = rl.save_history(&path) {
            tracing::debug!(path = %path.display(), error = %err, "could not save history");
        }
    }

    Ok(())
}

/// Text to show for one evaluated line, if any
fn format_result(result: &ReplResult, no_color: bool) -> Option<String> {
    if !result.diagnostics.is_empty() {
        let lines: Vec<_> = result
            .diagnostics
            .iter()
            .map(|diag| {
                format_error(
                    &format!("{}:{}: {}", diag.line, diag.column, diag.message),
                    no_color,
                )
            })
            .collect();
        return Some(lines.join("\n"));
    }

    match &result.value {
        Some(value @ Value::Error(_)) => Some(format_error(&value.to_string(), no_color)),
        Some(value) => Some(value.to_string()),
        None => None,
    }
}

fn format_error(text: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        format!("\x1b[31m{}\x1b[0m", text)
    }
}

fn print_help() {
    println!("Monkey REPL Commands:");
    println!("  :quit, :q         Exit the REPL");
    println!("  :reset            Clear all bindings");
    println!("  :vars             List bindings and their values");
    println!("  :help, :h         Show this help message");
    println!();
    println!("Examples:");
    println!("  >> let add = fn(a, b) {{ a + b }};");
    println!("  >> add(1, 2)");
    println!("  >> map([1, 2, 3], fn(x) {{ x * 2 }})");
}

fn print_vars(bindings: &[(String, Value)]) {
    if bindings.is_empty() {
        println!("No bindings defined.");
        return;
    }
    for (name, value) in bindings {
        println!("{:<16} {:<10} {}", name, value.type_tag(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(":q"), Some(Command::Quit));
        assert_eq!(Command::parse(":quit"), Some(Command::Quit));
        assert_eq!(Command::parse(":reset"), Some(Command::Reset));
        assert_eq!(Command::parse(":vars"), Some(Command::Vars));
        assert_eq!(Command::parse(":help"), Some(Command::Help));
        assert_eq!(
            Command::parse(":load x"),
            Some(Command::Unknown("load x".to_string()))
        );
        assert_eq!(Command::parse("let x = 1;"), None);
    }

    #[test]
    fn test_format_result() {
        let mut repl = ReplCore::new();
        assert_eq!(format_result(&repl.eval_line("let x = 2;"), true), None);
        assert_eq!(
            format_result(&repl.eval_line("[x, \"a\"]"), true),
            Some("[2, \"a\"]".to_string())
        );
        assert_eq!(
            format_result(&repl.eval_line("x + true"), true),
            Some("ERROR: type mismatch: INTEGER + BOOLEAN".to_string())
        );
        assert_eq!(
            format_result(&repl.eval_line("let = 1;"), true),
            Some("1:5: expected next token to be IDENT, got = instead".to_string())
        );
    }

    #[test]
    fn test_format_error_color() {
        assert_eq!(format_error("ERROR: x", true), "ERROR: x");
        assert!(format_error("ERROR: x", false).starts_with("\x1b[31m"));
    }
}
