use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Once;

mod commands;
mod config;

/// Monkey language interpreter.
///
/// Runs Monkey programs, starts an interactive REPL, and dumps the tokens
/// or syntax tree of a source file.
///
/// EXAMPLES:
///     monkey run main.mk           Run a Monkey program
///     monkey repl                  Start interactive REPL
///     monkey tokens main.mk        Show the token stream
///     monkey ast main.mk --json    Dump the syntax tree as JSON
///     monkey                       Same as `monkey repl`
///
/// ENVIRONMENT VARIABLES:
///     MONKEY_NO_HISTORY      Set to disable REPL history
///     MONKEY_HISTORY_FILE    Custom REPL history file
///     MONKEY_MAX_CALL_DEPTH  Maximum nesting of function calls
///     MONKEY_LOG             Log filter, e.g. 'monkey_runtime=debug'
///     NO_COLOR               Set to disable colored output
#[derive(Parser)]
#[command(name = "monkey")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Monkey source file
    ///
    /// Evaluates the file and prints the value of its last statement
    /// unless that value is null.
    ///
    /// EXAMPLES:
    ///     monkey run main.mk
    #[command(visible_alias = "r")]
    Run {
        /// Path to the Monkey source file
        file: String,
    },

    /// Start an interactive REPL
    ///
    /// REPL COMMANDS:
    ///     :help, :h      Show help
    ///     :quit, :q      Exit REPL
    ///     :reset         Clear all bindings
    ///     :vars          List defined bindings
    ///
    /// EXAMPLES:
    ///     monkey repl                  Start the REPL
    ///     monkey repl --tokens         Print tokens instead of evaluating
    ///     monkey repl --no-history     Disable history persistence
    Repl {
        /// Print the tokens of each line instead of evaluating it
        #[arg(long)]
        tokens: bool,
        /// Disable history persistence (for privacy)
        #[arg(long, env = "MONKEY_NO_HISTORY")]
        no_history: bool,
    },

    /// Dump the token stream of a source file
    ///
    /// EXAMPLES:
    ///     monkey tokens main.mk
    ///     monkey tokens main.mk --json
    Tokens {
        /// Path to the Monkey source file
        file: String,
        /// Output tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the syntax tree of a source file
    ///
    /// Prints the canonical, fully parenthesized rendering of the program,
    /// or the tree itself as JSON.
    ///
    /// EXAMPLES:
    ///     monkey ast main.mk
    ///     monkey ast main.mk --json > ast.json
    Ast {
        /// Path to the Monkey source file
        file: String,
        /// Output the AST as JSON
        #[arg(long)]
        json: bool,
    },
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber when MONKEY_LOG or RUST_LOG is set
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = std::env::var("MONKEY_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .map(EnvFilter::new);
        if let Some(filter) = filter {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    match cli.command {
        Some(Commands::Run { file }) => {
            commands::run::run(&file, &cli_config)?;
        }
        Some(Commands::Repl { tokens, no_history }) => {
            // Command-line flag overrides environment variable
            let disable_history = no_history || cli_config.no_history;
            commands::repl::run(tokens, disable_history, &cli_config)?;
        }
        None => {
            commands::repl::run(false, cli_config.no_history, &cli_config)?;
        }
        Some(Commands::Tokens { file, json }) => {
            commands::tokens::run(&file, json)?;
        }
        Some(Commands::Ast { file, json }) => {
            commands::ast::run(&file, json)?;
        }
    }

    Ok(())
}
