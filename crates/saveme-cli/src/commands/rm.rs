//! Batch delete command.

use clap::Args;
use futures::future::join_all;
use serde::Serialize;
use tabled::Tabled;

use saveme_browser::{AlwaysConfirm, BatchOutcome, ConfirmationPrompt};
use saveme_client::{DeleteOutcome, DriveClient, ResourceClient};
use saveme_core::config::AppConfig;
use saveme_core::error::{AppError, ErrorKind};
use saveme_core::result::AppResult;
use saveme_core::types::{FileId, FolderId};
use saveme_entity::AnyResource;

use crate::output::{self, OutputFormat};

/// Arguments for the rm command
#[derive(Debug, Args)]
pub struct RmArgs {
    /// File IDs to delete
    #[arg(long = "file", value_name = "ID")]
    pub files: Vec<FileId>,
    /// Folder IDs to delete
    #[arg(long = "folder", value_name = "ID")]
    pub folders: Vec<FolderId>,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Asks on the terminal, defaulting to no.
///
/// The prompt blocks on stdin, so it runs through `block_in_place` and
/// needs the multi-threaded runtime `#[tokio::main]` provides.
struct TerminalConfirm;

impl ConfirmationPrompt for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        tokio::task::block_in_place(|| {
            dialoguer::Confirm::new()
                .with_prompt(message)
                .default(false)
                .interact()
        })
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Confirmation prompt failed; treating as no");
            false
        })
    }
}

/// Per-item result row
#[derive(Debug, Serialize, Tabled)]
struct DeleteRow {
    /// Resource key
    target: String,
    /// Result
    status: String,
}

/// Execute the rm command
pub async fn execute(args: &RmArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let browser = super::controller(config)?;
    let drive = super::connect(config)?;

    for resource in lookup(&drive, args).await? {
        browser.toggle_select(resource).await;
    }

    let prompt: &dyn ConfirmationPrompt = if args.yes {
        &AlwaysConfirm
    } else {
        &TerminalConfirm
    };

    let report = match browser.delete_selected(prompt).await {
        BatchOutcome::NothingToDo => {
            output::print_warning("Nothing to delete");
            return Ok(());
        }
        BatchOutcome::Declined => {
            output::print_warning("Aborted");
            return Ok(());
        }
        BatchOutcome::Completed(report) => report,
    };

    let rows: Vec<DeleteRow> = report
        .items
        .iter()
        .map(|item| DeleteRow {
            target: item.target.to_string(),
            status: match &item.result {
                Ok(DeleteOutcome::Deleted) => "deleted".to_string(),
                Ok(DeleteOutcome::AlreadyGone) => "already gone".to_string(),
                Err(e) => format!("failed: {e}"),
            },
        })
        .collect();
    output::print_list(&rows, format);

    if report.failed() > 0 {
        return Err(AppError::new(
            ErrorKind::Server,
            format!("{} of {} deletions failed", report.failed(), report.dispatched()),
        ));
    }
    Ok(())
}

/// Fetch the named resources so they can be selected.
///
/// Ids that no longer exist are reported and skipped.
async fn lookup(drive: &DriveClient, args: &RmArgs) -> AppResult<Vec<AnyResource>> {
    let files = join_all(args.files.iter().map(|id| async move {
        (id.to_string(), drive.files.get(*id).await.map(AnyResource::from))
    }));
    let folders = join_all(args.folders.iter().map(|id| async move {
        (id.to_string(), drive.folders.get(*id).await.map(AnyResource::from))
    }));
    let (files, folders) = futures::join!(files, folders);

    let mut found = Vec::new();
    for (id, result) in files.into_iter().chain(folders) {
        match result {
            Ok(resource) => found.push(resource),
            Err(e) if e.is_not_found() => output::print_warning(&format!("{id}: not found, skipped")),
            Err(e) => return Err(e),
        }
    }
    Ok(found)
}
