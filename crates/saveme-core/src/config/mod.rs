//! Client configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file and `SAVEME__`-prefixed environment variables.
//! Each sub-module represents a logical configuration section.

pub mod api;
pub mod browser;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::browser::BrowserConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Browsing workflow settings.
    #[serde(default)]
    pub browser: BrowserConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Sources, lowest precedence first: `config/default.toml` (optional),
    /// the explicit `path` (required when given), then environment
    /// variables such as `SAVEME__API__BASE_URL`.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("SAVEME")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }
        if token.is_some() {
            self.api.token = token;
        }
        self
    }
}
