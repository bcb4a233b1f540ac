//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Diagnostics written to stderr by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `"warn"` or `"saveme_browser=debug,info"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// `"pretty"` for humans, `"json"` for log shippers.
    #[serde(default = "default_format")]
    pub format: String,
    /// Emit ANSI colors in pretty output.
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl LoggingConfig {
    /// Whether JSON output was requested.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            ansi: default_ansi(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_ansi() -> bool {
    true
}
