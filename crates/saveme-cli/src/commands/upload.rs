//! Batch upload command.

use std::path::PathBuf;

use clap::Args;
use futures::future::try_join_all;
use serde::Serialize;
use tabled::Tabled;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use saveme_browser::BatchOutcome;
use saveme_client::LocalFile;
use saveme_core::config::AppConfig;
use saveme_core::error::{AppError, ErrorKind};
use saveme_core::types::FolderId;

use crate::output::{self, OutputFormat};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Paths of the files to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Target folder ID (omit for root)
    #[arg(long)]
    pub folder: Option<FolderId>,
}

/// Per-file result row
#[derive(Debug, Serialize, Tabled)]
struct UploadRow {
    /// Local file name
    name: String,
    /// New file ID, if created
    id: String,
    /// Result
    status: String,
}

/// Follow upload progress until it reaches 100 or the sender goes away.
///
/// Returns the last value seen.
fn spawn_printer(mut progress: watch::Receiver<u8>, show: bool) -> JoinHandle<u8> {
    tokio::spawn(async move {
        let mut last = *progress.borrow();
        while progress.changed().await.is_ok() {
            last = *progress.borrow_and_update();
            if show {
                output::print_progress("Uploading", last);
            }
            if last >= 100 {
                break;
            }
        }
        last
    })
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let files = try_join_all(args.paths.iter().map(|p| LocalFile::from_path(p))).await?;

    let browser = super::controller(config)?;
    browser.navigate(args.folder).await;

    let printer = spawn_printer(browser.subscribe_progress(), format == OutputFormat::Table);

    let outcome = browser.upload_files(files).await;
    if outcome.report().is_some() {
        if let Err(e) = printer.await {
            tracing::warn!(error = %e, "Progress printer stopped early");
        }
    } else {
        printer.abort();
    }

    let BatchOutcome::Completed(report) = outcome else {
        output::print_warning("Nothing to upload");
        return Ok(());
    };

    let rows: Vec<UploadRow> = report
        .items
        .iter()
        .map(|item| match &item.result {
            Ok(file) => UploadRow {
                name: item.target.clone(),
                id: file.id.to_string(),
                status: format!("uploaded ({})", file.display_size()),
            },
            Err(e) => UploadRow {
                name: item.target.clone(),
                id: "-".to_string(),
                status: format!("failed: {e}"),
            },
        })
        .collect();
    output::print_list(&rows, format);

    if report.failed() > 0 {
        return Err(AppError::new(
            ErrorKind::Server,
            format!("{} of {} uploads failed", report.failed(), report.dispatched()),
        ));
    }
    Ok(())
}
