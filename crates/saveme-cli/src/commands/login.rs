//! Login command.

use clap::Args;

use saveme_client::HttpTransport;
use saveme_core::config::AppConfig;
use saveme_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username
    pub username: String,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute the login command
pub async fn execute(
    args: &LoginArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let transport = HttpTransport::new(&config.api)?;
    let auth = transport.login(&args.username, &password).await?;

    match format {
        OutputFormat::Json => output::print_json(&auth, "{}"),
        OutputFormat::Table => {
            output::print_success(&format!("Logged in as '{}' (id: {})", auth.username, auth.id));
            output::print_kv("Token", &auth.token);
            println!();
            println!("  export SAVEME__API__TOKEN={}", auth.token);
        }
    }
    Ok(())
}
