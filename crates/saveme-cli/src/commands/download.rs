//! File download command.

use std::path::PathBuf;

use clap::Args;

use saveme_core::config::AppConfig;
use saveme_core::error::AppError;
use saveme_core::types::FileId;

use crate::output;

/// Arguments for the download command
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// File ID
    pub file_id: FileId,
    /// Destination file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Execute the download command
pub async fn execute(args: &DownloadArgs, config: &AppConfig) -> Result<(), AppError> {
    let drive = super::connect(config)?;
    let (path, size) = drive.files.download_to(args.file_id, &args.output).await?;

    output::print_success(&format!(
        "Saved {} ({})",
        path.display(),
        saveme_entity::format_file_size(size)
    ));
    Ok(())
}
