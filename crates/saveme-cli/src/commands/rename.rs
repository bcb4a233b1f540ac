//! Folder rename command.

use clap::Args;

use saveme_client::ResourceClient;
use saveme_core::config::AppConfig;
use saveme_core::error::AppError;
use saveme_core::types::FolderId;

use crate::output::{self, OutputFormat};

/// Arguments for the rename command
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Folder ID
    pub folder_id: FolderId,
    /// New name
    pub name: String,
}

/// Execute the rename command
pub async fn execute(
    args: &RenameArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let drive = super::connect(config)?;
    let current = drive.folders.get(args.folder_id).await?;
    let folder = drive
        .folders
        .rename(current.id, current.parent_folder_id, &args.name)
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&folder, "{}"),
        OutputFormat::Table => output::print_success(&format!(
            "Folder '{}' renamed to '{}'",
            current.name, folder.name
        )),
    }
    Ok(())
}
