//! Transport trait for the drive backend.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use saveme_core::result::AppResult;
use saveme_core::types::{FileId, FolderId};
use saveme_entity::{File, Folder, FolderRequest};

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Authenticated access to the drive REST endpoints.
///
/// Implementations must map transport failures into the
/// [`saveme_core::ErrorKind`] taxonomy: connectivity problems as
/// `Network`, rejected credentials as `Authentication` and unknown ids as
/// `NotFound`. Retrying is left to the caller.
#[async_trait]
pub trait DriveTransport: Send + Sync + 'static {
    /// List folders directly under `parent` (root level when `None`).
    async fn list_folders(&self, parent: Option<FolderId>) -> AppResult<Vec<Folder>>;

    /// Fetch one folder.
    async fn get_folder(&self, id: FolderId) -> AppResult<Folder>;

    /// Create a folder.
    async fn create_folder(&self, request: &FolderRequest) -> AppResult<Folder>;

    /// Rename or re-parent a folder.
    async fn update_folder(&self, id: FolderId, request: &FolderRequest) -> AppResult<Folder>;

    /// Delete a folder and everything below it.
    async fn delete_folder(&self, id: FolderId) -> AppResult<()>;

    /// List files directly inside `folder` (root level when `None`).
    async fn list_files(&self, folder: Option<FolderId>) -> AppResult<Vec<File>>;

    /// Fetch one file's metadata.
    async fn get_file(&self, id: FileId) -> AppResult<File>;

    /// Upload `bytes` as `file_name` into `folder`.
    async fn upload_file(
        &self,
        file_name: &str,
        bytes: Bytes,
        folder: Option<FolderId>,
    ) -> AppResult<File>;

    /// Stream a file's content.
    async fn download_file(&self, id: FileId) -> AppResult<ByteStream>;

    /// Delete a file.
    async fn delete_file(&self, id: FileId) -> AppResult<()>;
}
