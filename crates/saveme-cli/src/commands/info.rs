//! File details command.

use clap::Args;

use saveme_client::ResourceClient;
use saveme_core::config::AppConfig;
use saveme_core::error::AppError;
use saveme_core::types::FileId;

use crate::output::{self, OutputFormat};

/// Arguments for the info command
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// File ID
    pub file_id: FileId,
}

/// Execute the info command
pub async fn execute(
    args: &InfoArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let drive = super::connect(config)?;
    let file = drive.files.get(args.file_id).await?;

    match format {
        OutputFormat::Json => output::print_json(&file, "{}"),
        OutputFormat::Table => {
            println!("{}", file.original_file_name);
            output::print_kv("ID", &file.id.to_string());
            output::print_kv("Type", &file.content_type);
            output::print_kv("Size", &format!("{} ({} bytes)", file.display_size(), file.size));
            output::print_kv(
                "Folder",
                &file
                    .folder_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "(root)".to_string()),
            );
            output::print_kv("Owner", &file.owner_username);
            output::print_kv("Uploaded", &file.created_at.to_rfc3339());
            output::print_kv("Updated", &file.updated_at.to_rfc3339());
        }
    }
    Ok(())
}
