//! CLI configuration via environment variables
//!
//! Everything here is optional. Command-line flags win over these values.

use std::env;
use std::path::PathBuf;

use monkey_runtime::InterpreterOptions;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Disable colored output (MONKEY_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Custom history file path (MONKEY_HISTORY_FILE=/path/to/file)
    pub history_file: Option<PathBuf>,
    /// Disable history by default (MONKEY_NO_HISTORY=1)
    pub no_history: bool,
    /// Override the interpreter's call depth limit (MONKEY_MAX_CALL_DEPTH=N)
    pub max_call_depth: Option<usize>,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            no_color: lookup("MONKEY_NO_COLOR").is_some() || lookup("NO_COLOR").is_some(),
            history_file: lookup("MONKEY_HISTORY_FILE").map(PathBuf::from),
            no_history: lookup("MONKEY_NO_HISTORY").is_some(),
            // unparsable values fall back to the default
            max_call_depth: lookup("MONKEY_MAX_CALL_DEPTH")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|depth| *depth > 0),
        }
    }

    /// Get the history file path
    ///
    /// Returns:
    /// 1. MONKEY_HISTORY_FILE if set
    /// 2. ~/.monkey/history if home directory exists
    /// 3. None otherwise
    pub fn get_history_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.history_file {
            return Some(path.clone());
        }
        dirs::home_dir().map(|home| home.join(".monkey").join("history"))
    }

    pub fn interpreter_options(&self) -> InterpreterOptions {
        let mut options = InterpreterOptions::default();
        if let Some(depth) = self.max_call_depth {
            options.max_call_depth = depth;
        }
        options
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
