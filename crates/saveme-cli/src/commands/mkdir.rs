//! Folder creation command.

use clap::Args;

use saveme_core::config::AppConfig;
use saveme_core::error::AppError;
use saveme_core::types::FolderId;

use crate::output::{self, OutputFormat};

/// Arguments for the mkdir command
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Folder name
    pub name: String,
    /// Parent folder ID (omit for root)
    #[arg(short, long)]
    pub parent: Option<FolderId>,
}

/// Execute the mkdir command
pub async fn execute(
    args: &MkdirArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let drive = super::connect(config)?;
    let folder = drive.folders.create(args.parent, &args.name).await?;

    match format {
        OutputFormat::Json => output::print_json(&folder, "{}"),
        OutputFormat::Table => {
            output::print_success(&format!("Folder '{}' created (id: {})", folder.name, folder.id))
        }
    }
    Ok(())
}
