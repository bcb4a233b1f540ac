//! Folder listing command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use saveme_browser::BrowserSnapshot;
use saveme_core::error::AppError;
use saveme_core::types::FolderId;
use saveme_entity::{File, Folder};

use crate::output::{self, OutputFormat};

/// Arguments for the ls command
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Folder ID (omit for the root level)
    pub folder_id: Option<FolderId>,
}

/// One listing row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct EntryRow {
    /// FILE or FOLDER
    #[tabled(rename = "type")]
    kind: &'static str,
    /// Resource ID
    id: i64,
    /// Name
    name: String,
    /// Human-readable size
    size: String,
    /// Last update
    updated: String,
}

impl From<&Folder> for EntryRow {
    fn from(folder: &Folder) -> Self {
        Self {
            kind: "FOLDER",
            id: folder.id.get(),
            name: format!("{}/", folder.name),
            size: "-".to_string(),
            updated: folder.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

impl From<&File> for EntryRow {
    fn from(file: &File) -> Self {
        Self {
            kind: "FILE",
            id: file.id.get(),
            name: file.original_file_name.clone(),
            size: file.display_size(),
            updated: file.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// JSON shape of a listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Listing<'a> {
    folder_id: Option<FolderId>,
    breadcrumbs: &'a [Folder],
    folders: &'a [Folder],
    files: &'a [File],
}

/// Execute the ls command
pub async fn execute(
    args: &LsArgs,
    config: &saveme_core::config::AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let browser = super::controller(config)?;
    browser
        .navigate(args.folder_id)
        .await
        .breadcrumbs_resolved()
        .await;
    let snapshot = browser.snapshot().await;

    if let Some(err) = listing_failure(&snapshot) {
        return Err(err);
    }
    if let Some(err) = &snapshot.last_error {
        output::print_warning(&format!("Listing may be incomplete: {err}"));
    }

    match format {
        OutputFormat::Json => output::print_json(
            &Listing {
                folder_id: snapshot.current_folder_id,
                breadcrumbs: &snapshot.breadcrumbs,
                folders: &snapshot.folders,
                files: &snapshot.files,
            },
            "{}",
        ),
        OutputFormat::Table => {
            let trail: Vec<&str> = snapshot.breadcrumbs.iter().map(|f| f.name.as_str()).collect();
            println!("/{}", trail.join("/"));

            let rows: Vec<EntryRow> = snapshot
                .folders
                .iter()
                .map(EntryRow::from)
                .chain(snapshot.files.iter().map(EntryRow::from))
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

/// The error to exit with when nothing could be listed at all.
fn listing_failure(snapshot: &BrowserSnapshot) -> Option<AppError> {
    if snapshot.folders.is_empty() && snapshot.files.is_empty() {
        snapshot.last_error.clone()
    } else {
        None
    }
}
