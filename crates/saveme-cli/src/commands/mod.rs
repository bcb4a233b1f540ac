//! CLI command definitions and dispatch.

pub mod config;
pub mod download;
pub mod info;
pub mod login;
pub mod ls;
pub mod mkdir;
pub mod rename;
pub mod rm;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use saveme_browser::BrowserController;
use saveme_client::{DriveClient, HttpTransport};
use saveme_core::config::AppConfig;
use saveme_core::error::AppError;

use crate::output::OutputFormat;

/// SaveMe: browse and manage files on a SaveMe drive
#[derive(Debug, Parser)]
#[command(name = "saveme", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file
    #[arg(short, long, env = "SAVEME_CONFIG")]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Backend base URL (overrides the configuration)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Bearer token (overrides the configuration)
    #[arg(long, env = "SAVEME_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List a folder (root when no id is given)
    Ls(ls::LsArgs),
    /// Create a folder
    Mkdir(mkdir::MkdirArgs),
    /// Rename a folder
    Rename(rename::RenameArgs),
    /// Delete files and folders
    Rm(rm::RmArgs),
    /// Upload local files
    Upload(upload::UploadArgs),
    /// Download a file
    Download(download::DownloadArgs),
    /// Show file details
    Info(info::InfoArgs),
    /// Log in and print a bearer token
    Login(login::LoginArgs),
    /// Show the effective configuration
    Config,
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        Ok(AppConfig::load(self.config.as_deref())?
            .with_overrides(self.url.clone(), self.token.clone()))
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Ls(args) => ls::execute(args, &config, self.format).await,
            Commands::Mkdir(args) => mkdir::execute(args, &config, self.format).await,
            Commands::Rename(args) => rename::execute(args, &config, self.format).await,
            Commands::Rm(args) => rm::execute(args, &config, self.format).await,
            Commands::Upload(args) => upload::execute(args, &config, self.format).await,
            Commands::Download(args) => download::execute(args, &config).await,
            Commands::Info(args) => info::execute(args, &config, self.format).await,
            Commands::Login(args) => login::execute(args, &config, self.format).await,
            Commands::Config => config::execute(&config, self.format),
        }
    }
}

/// Helper: build a drive client from configuration
pub fn connect(config: &AppConfig) -> Result<DriveClient, AppError> {
    let transport = HttpTransport::new(&config.api)?;
    Ok(DriveClient::new(Arc::new(transport)))
}

/// Helper: build a browser controller from configuration
pub fn controller(config: &AppConfig) -> Result<BrowserController, AppError> {
    Ok(BrowserController::new(
        connect(config)?,
        config.browser.clone(),
    ))
}
