//! The folder browser: navigation, folder creation and batch operations.
//!
//! All state lives in one [`BrowserSnapshot`] behind an async lock. Each
//! navigation takes a fresh token from a monotonically increasing counter;
//! responses that arrive after a newer navigation started are dropped
//! instead of overwriting the newer view.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::StreamExt;
use futures::future::join_all;
use futures::stream::FuturesUnordered;
use tokio::sync::{RwLock, Semaphore, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use saveme_client::{DeleteOutcome, DriveClient, LocalFile, ResourceClient};
use saveme_core::config::browser::BrowserConfig;
use saveme_core::error::AppError;
use saveme_core::result::AppResult;
use saveme_core::types::{FileId, FolderId, ResourceKey, ResourceKind};
use saveme_entity::{AnyResource, File, Folder};

use crate::batch::{BatchItem, BatchOutcome, BatchReport};
use crate::breadcrumb::BreadcrumbResolver;
use crate::confirm::ConfirmationPrompt;
use crate::selection::SelectionSet;

/// Loading state of the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Lists for the current folder are in flight.
    Loading,
    /// Both lists settled (successfully or not).
    Ready,
}

/// Everything a front end needs to render the browser.
#[derive(Debug, Clone, Default)]
pub struct BrowserSnapshot {
    /// Loading state.
    pub state: LoadState,
    /// Folder being shown (`None` = root).
    pub current_folder_id: Option<FolderId>,
    /// Details of the folder being shown, once fetched.
    pub current_folder: Option<Folder>,
    /// Path from the root to the current folder, once resolved.
    pub breadcrumbs: Vec<Folder>,
    /// Sub-folders of the current folder.
    pub folders: Vec<Folder>,
    /// Files in the current folder.
    pub files: Vec<File>,
    /// Current selection.
    pub selection: SelectionSet,
    /// The create-folder form is open.
    pub creating_folder: bool,
    /// Name last submitted in the create-folder form.
    pub pending_folder_name: Option<String>,
    /// A batch upload is running.
    pub uploading: bool,
    /// Batch upload progress, 0 to 100.
    pub upload_progress: u8,
    /// Most recent failure, for display.
    pub last_error: Option<AppError>,
}

/// Handle returned by [`BrowserController::navigate`].
#[derive(Debug)]
pub struct Navigation {
    /// Token of this navigation.
    pub token: u64,
    /// Whether the list results were applied (false when superseded).
    pub applied: bool,
    breadcrumbs: Option<JoinHandle<()>>,
}

impl Navigation {
    /// Wait until breadcrumb resolution for this navigation has finished.
    pub async fn breadcrumbs_resolved(self) {
        if let Some(handle) = self.breadcrumbs {
            if let Err(e) = handle.await {
                warn!(error = %e, "Breadcrumb task did not complete");
            }
        }
    }
}

/// Orchestrates browsing over a [`DriveClient`].
#[derive(Clone)]
pub struct BrowserController {
    drive: DriveClient,
    breadcrumbs: BreadcrumbResolver,
    config: BrowserConfig,
    state: Arc<RwLock<BrowserSnapshot>>,
    nav_token: Arc<AtomicU64>,
    progress: Arc<watch::Sender<u8>>,
    limiter: Arc<Semaphore>,
}

impl BrowserController {
    /// Create a controller in the `Idle` state.
    pub fn new(drive: DriveClient, config: BrowserConfig) -> Self {
        let breadcrumbs =
            BreadcrumbResolver::new(drive.folders.clone(), config.max_breadcrumb_depth);
        let (progress, _) = watch::channel(0);
        let limiter = Arc::new(Semaphore::new(config.max_concurrent_requests.max(1)));

        Self {
            drive,
            breadcrumbs,
            config,
            state: Arc::new(RwLock::new(BrowserSnapshot::default())),
            nav_token: Arc::new(AtomicU64::new(0)),
            progress: Arc::new(progress),
            limiter,
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> BrowserSnapshot {
        self.state.read().await.clone()
    }

    /// Folder currently shown.
    pub async fn current_folder_id(&self) -> Option<FolderId> {
        self.state.read().await.current_folder_id
    }

    /// Receive upload progress updates (0 to 100).
    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    fn is_current(&self, token: u64) -> bool {
        self.nav_token.load(Ordering::SeqCst) == token
    }

    /// Show `folder_id` (root when `None`).
    ///
    /// Returns once both the folder and the file list have settled. For a
    /// non-root folder the breadcrumbs resolve in the background; await
    /// [`Navigation::breadcrumbs_resolved`] to wait for them.
    pub async fn navigate(&self, folder_id: Option<FolderId>) -> Navigation {
        let token = self.nav_token.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(token, folder_id = ?folder_id, "Navigating");

        {
            let mut state = self.state.write().await;
            state.state = LoadState::Loading;
            state.current_folder_id = folder_id;
            state.current_folder = None;
            state.breadcrumbs.clear();
            state.selection.clear();
            state.last_error = None;
        }

        let breadcrumbs = folder_id.map(|id| self.spawn_breadcrumbs(token, id));

        let (folders, files) = futures::join!(
            self.drive.folders.list(folder_id),
            self.drive.files.list(folder_id)
        );

        let mut state = self.state.write().await;
        if !self.is_current(token) {
            debug!(token, "Discarding superseded listing");
            return Navigation {
                token,
                applied: false,
                breadcrumbs,
            };
        }

        match folders {
            Ok(list) => state.folders = list,
            Err(e) => {
                warn!(folder_id = ?folder_id, error = %e, "Failed to load folders");
                state.folders.clear();
                state.last_error = Some(e);
            }
        }
        match files {
            Ok(list) => state.files = list,
            Err(e) => {
                warn!(folder_id = ?folder_id, error = %e, "Failed to load files");
                state.files.clear();
                state.last_error = Some(e);
            }
        }
        state.state = LoadState::Ready;

        Navigation {
            token,
            applied: true,
            breadcrumbs,
        }
    }

    fn spawn_breadcrumbs(&self, token: u64, folder_id: FolderId) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let folder = match this.drive.folders.get(folder_id).await {
                Ok(folder) => folder,
                Err(e) => {
                    warn!(%folder_id, error = %e, "Failed to load folder details");
                    this.record_error(token, e).await;
                    return;
                }
            };

            {
                let mut state = this.state.write().await;
                if !this.is_current(token) {
                    return;
                }
                state.current_folder = Some(folder.clone());
            }

            match this.breadcrumbs.resolve(folder).await {
                Ok(chain) => {
                    let mut state = this.state.write().await;
                    if this.is_current(token) {
                        state.breadcrumbs = chain;
                    }
                }
                Err(e) => {
                    warn!(%folder_id, error = %e, "Failed to resolve breadcrumbs");
                    this.record_error(token, e).await;
                }
            }
        })
    }

    async fn record_error(&self, token: u64, err: AppError) {
        let mut state = self.state.write().await;
        if self.is_current(token) {
            state.last_error = Some(err);
        }
    }

    /// Re-show the current folder.
    pub async fn refresh(&self) -> Navigation {
        let current = self.current_folder_id().await;
        self.navigate(current).await
    }

    /// Open the create-folder form.
    pub async fn begin_create_folder(&self) {
        let mut state = self.state.write().await;
        state.creating_folder = true;
        state.pending_folder_name = None;
    }

    /// Close the create-folder form.
    pub async fn cancel_create_folder(&self) {
        let mut state = self.state.write().await;
        state.creating_folder = false;
        state.pending_folder_name = None;
    }

    /// Create a folder inside the current folder.
    ///
    /// On success the view is refreshed and the form closed; on failure the
    /// form stays open with the submitted name kept.
    pub async fn create_folder(&self, name: &str) -> AppResult<Folder> {
        let parent = {
            let mut state = self.state.write().await;
            state.creating_folder = true;
            state.pending_folder_name = Some(name.to_string());
            state.current_folder_id
        };

        match self.drive.folders.create(parent, name).await {
            Ok(folder) => {
                self.navigate(parent).await;
                let mut state = self.state.write().await;
                state.creating_folder = false;
                state.pending_folder_name = None;
                Ok(folder)
            }
            Err(e) => {
                warn!(name, error = %e, "Failed to create folder");
                self.state.write().await.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Rename a folder shown in the current view, then refresh.
    pub async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<Folder> {
        let parent = self.current_folder_id().await;
        match self.drive.folders.rename(id, parent, name).await {
            Ok(folder) => {
                self.navigate(parent).await;
                Ok(folder)
            }
            Err(e) => {
                warn!(%id, name, error = %e, "Failed to rename folder");
                self.state.write().await.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Toggle selection of a resource; returns whether it is now selected.
    pub async fn toggle_select(&self, resource: impl Into<AnyResource>) -> bool {
        self.state.write().await.selection.toggle(resource)
    }

    /// Whether the resource with this raw id and kind is selected.
    pub async fn is_selected(&self, id: i64, kind: ResourceKind) -> bool {
        self.state.read().await.selection.is_selected(id, kind)
    }

    /// Delete every selected resource.
    ///
    /// Nothing happens, and no prompt is shown, when the selection is
    /// empty. Otherwise `prompt` must approve; then one delete per entry is
    /// dispatched concurrently, all are awaited regardless of failures, and
    /// the view is refreshed once.
    pub async fn delete_selected(
        &self,
        prompt: &dyn ConfirmationPrompt,
    ) -> BatchOutcome<ResourceKey, DeleteOutcome> {
        let keys: Vec<ResourceKey> = {
            let state = self.state.read().await;
            state.selection.entries().map(|e| e.key).collect()
        };
        if keys.is_empty() {
            return BatchOutcome::NothingToDo;
        }

        if !prompt.confirm(&format!("Delete {} selected item(s)?", keys.len())) {
            debug!(count = keys.len(), "Batch delete declined");
            return BatchOutcome::Declined;
        }

        info!(count = keys.len(), "Deleting selection");
        let items = join_all(keys.into_iter().map(|key| self.delete_one(key))).await;
        let report = BatchReport { items };
        info!(
            deleted = report.succeeded(),
            failed = report.failed(),
            "Batch delete settled"
        );

        self.refresh().await;
        BatchOutcome::Completed(report)
    }

    async fn delete_one(&self, key: ResourceKey) -> BatchItem<ResourceKey, DeleteOutcome> {
        let _permit = self.limiter.acquire().await.ok();
        let result = match key {
            ResourceKey::File(id) => self.drive.files.delete(id).await,
            ResourceKey::Folder(id) => self.drive.folders.delete(id).await,
        };
        if let Err(e) = &result {
            warn!(%key, error = %e, "Failed to delete");
        }
        BatchItem {
            target: key,
            result,
        }
    }

    /// Upload local files into the current folder.
    ///
    /// Uploads run concurrently; progress is recomputed as each settles,
    /// failures included, so it always ends at 100. After a short grace
    /// period the upload flag is cleared and the view refreshed.
    pub async fn upload_files(&self, files: Vec<LocalFile>) -> BatchOutcome<String, File> {
        if files.is_empty() {
            return BatchOutcome::NothingToDo;
        }

        let total = files.len();
        let folder = {
            let mut state = self.state.write().await;
            state.uploading = true;
            state.upload_progress = 0;
            state.current_folder_id
        };
        self.progress.send_replace(0);
        info!(count = total, folder_id = ?folder, "Uploading files");

        let mut pending: FuturesUnordered<_> = files
            .into_iter()
            .map(|file| self.upload_one(file, folder))
            .collect();

        let mut items = Vec::with_capacity(total);
        while let Some(item) = pending.next().await {
            items.push(item);
            let progress = upload_percent(items.len(), total);
            self.state.write().await.upload_progress = progress;
            self.progress.send_replace(progress);
        }

        let report = BatchReport { items };
        info!(
            uploaded = report.succeeded(),
            failed = report.failed(),
            "Batch upload settled"
        );

        let grace = self.config.upload_grace();
        if !grace.is_zero() {
            tokio::time::sleep(grace).await;
        }
        self.state.write().await.uploading = false;

        self.refresh().await;
        BatchOutcome::Completed(report)
    }

    async fn upload_one(&self, file: LocalFile, folder: Option<FolderId>) -> BatchItem<String, File> {
        let _permit = self.limiter.acquire().await.ok();
        let name = file.name.clone();
        let result = self.drive.files.upload(file, folder).await;
        if let Err(e) = &result {
            warn!(name = %name, error = %e, "Failed to upload");
        }
        BatchItem {
            target: name,
            result,
        }
    }

    /// Save a file to `dest` (a directory or a file path).
    pub async fn download(&self, id: FileId, dest: &Path) -> AppResult<PathBuf> {
        match self.drive.files.download_to(id, dest).await {
            Ok((path, _)) => Ok(path),
            Err(e) => {
                warn!(%id, error = %e, "Failed to download");
                self.state.write().await.last_error = Some(e.clone());
                Err(e)
            }
        }
    }
}

/// `completed / total` as a rounded percentage.
fn upload_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}
