//! Typed resource clients layered over a [`DriveTransport`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use validator::Validate;

use saveme_core::error::{AppError, ErrorKind};
use saveme_core::result::AppResult;
use saveme_core::types::{FileId, FolderId};
use saveme_entity::{File, Folder, FolderRequest, Resource};

use crate::transport::{ByteStream, DriveTransport};

/// How a delete request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The resource existed and was removed.
    Deleted,
    /// The resource was already gone; treated as success.
    AlreadyGone,
}

/// Operations shared by the file and folder clients.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// The resource kind this client manages.
    type Resource: Resource;

    /// List resources directly under `parent` (root level when `None`).
    async fn list(&self, parent: Option<FolderId>) -> AppResult<Vec<Self::Resource>>;

    /// Fetch one resource.
    async fn get(&self, id: <Self::Resource as Resource>::Id) -> AppResult<Self::Resource>;

    /// Delete one resource. A missing resource is not an error.
    async fn delete(&self, id: <Self::Resource as Resource>::Id) -> AppResult<DeleteOutcome>;
}

fn settle_delete(result: AppResult<()>, what: &str) -> AppResult<DeleteOutcome> {
    match result {
        Ok(()) => Ok(DeleteOutcome::Deleted),
        Err(e) if e.is_not_found() => {
            debug!(resource = what, "Delete target already gone");
            Ok(DeleteOutcome::AlreadyGone)
        }
        Err(e) => Err(e),
    }
}

/// Client for folder resources.
#[derive(Clone)]
pub struct FolderClient {
    transport: Arc<dyn DriveTransport>,
}

impl FolderClient {
    /// Create a folder client on top of `transport`.
    pub fn new(transport: Arc<dyn DriveTransport>) -> Self {
        Self { transport }
    }

    /// Create a folder under `parent`.
    ///
    /// The name is validated locally; an invalid name never reaches the
    /// transport.
    pub async fn create(&self, parent: Option<FolderId>, name: &str) -> AppResult<Folder> {
        let request = FolderRequest::new(name, parent);
        request.validate()?;

        let folder = self.transport.create_folder(&request).await?;
        info!(folder_id = %folder.id, name = %folder.name, "Folder created");
        Ok(folder)
    }

    /// Rename a folder, keeping it under `parent`.
    pub async fn rename(
        &self,
        id: FolderId,
        parent: Option<FolderId>,
        name: &str,
    ) -> AppResult<Folder> {
        let request = FolderRequest::new(name, parent);
        request.validate()?;

        let folder = self.transport.update_folder(id, &request).await?;
        info!(folder_id = %folder.id, name = %folder.name, "Folder renamed");
        Ok(folder)
    }
}

#[async_trait]
impl ResourceClient for FolderClient {
    type Resource = Folder;

    async fn list(&self, parent: Option<FolderId>) -> AppResult<Vec<Folder>> {
        self.transport.list_folders(parent).await
    }

    async fn get(&self, id: FolderId) -> AppResult<Folder> {
        self.transport.get_folder(id).await
    }

    async fn delete(&self, id: FolderId) -> AppResult<DeleteOutcome> {
        settle_delete(self.transport.delete_folder(id).await, "folder")
    }
}

/// A local file picked for upload.
#[derive(Debug, Clone)]
pub struct LocalFile {
    /// The file name sent to the server.
    pub name: String,
    /// File content.
    pub bytes: Bytes,
}

impl LocalFile {
    /// Wrap in-memory content.
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, using its file name as the upload name.
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::validation(format!("Not a file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(name, bytes))
    }
}

/// Client for file resources.
#[derive(Clone)]
pub struct FileClient {
    transport: Arc<dyn DriveTransport>,
}

impl FileClient {
    /// Create a file client on top of `transport`.
    pub fn new(transport: Arc<dyn DriveTransport>) -> Self {
        Self { transport }
    }

    /// Upload a local file into `folder`.
    pub async fn upload(&self, file: LocalFile, folder: Option<FolderId>) -> AppResult<File> {
        if file.name.trim().is_empty() {
            return Err(AppError::validation("Upload file name cannot be empty"));
        }

        let size = file.bytes.len();
        let created = self
            .transport
            .upload_file(&file.name, file.bytes, folder)
            .await?;
        info!(file_id = %created.id, name = %created.original_file_name, size, "File uploaded");
        Ok(created)
    }

    /// Download a file into memory.
    pub async fn download(&self, id: FileId) -> AppResult<Bytes> {
        let mut stream = self.transport.download_file(id).await?;
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| interrupted(id, e))?;
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Save a file to disk.
    ///
    /// When `dest` is a directory the file keeps its original name inside
    /// it. Content is written to a `.part` sibling and moved over the target
    /// only once the whole stream arrived, so a failed download leaves an
    /// existing file untouched. Returns the written path and byte count.
    pub async fn download_to(&self, id: FileId, dest: &Path) -> AppResult<(PathBuf, u64)> {
        let target = if tokio::fs::metadata(dest)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            let meta = self.get(id).await?;
            dest.join(sanitize_file_name(&meta.original_file_name))
        } else {
            dest.to_path_buf()
        };

        let stream = self.transport.download_file(id).await?;
        let partial = partial_path(&target);
        let written = match write_stream(id, stream, &partial).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(rm) = tokio::fs::remove_file(&partial).await {
                    if rm.kind() != std::io::ErrorKind::NotFound {
                        warn!(path = %partial.display(), error = %rm, "Failed to remove partial download");
                    }
                }
                return Err(e);
            }
        };
        tokio::fs::rename(&partial, &target).await?;

        info!(file_id = %id, path = %target.display(), bytes = written, "File saved");
        Ok((target, written))
    }
}

/// A broken download stream, reported the same way for both download paths.
fn interrupted(id: FileId, err: std::io::Error) -> AppError {
    AppError::with_source(
        ErrorKind::Network,
        format!("Download of file {id} interrupted: {err}"),
        err,
    )
}

/// `report.pdf` -> `report.pdf.part`, in the same directory.
fn partial_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    target.with_file_name(name)
}

async fn write_stream(id: FileId, mut stream: ByteStream, path: &Path) -> AppResult<u64> {
    let mut out = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| interrupted(id, e))?;
        out.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    out.flush().await?;
    Ok(written)
}

#[async_trait]
impl ResourceClient for FileClient {
    type Resource = File;

    async fn list(&self, parent: Option<FolderId>) -> AppResult<Vec<File>> {
        self.transport.list_files(parent).await
    }

    async fn get(&self, id: FileId) -> AppResult<File> {
        self.transport.get_file(id).await
    }

    async fn delete(&self, id: FileId) -> AppResult<DeleteOutcome> {
        settle_delete(self.transport.delete_file(id).await, "file")
    }
}

/// Both resource clients sharing one transport.
#[derive(Clone)]
pub struct DriveClient {
    /// Folder operations.
    pub folders: FolderClient,
    /// File operations.
    pub files: FileClient,
}

impl DriveClient {
    /// Build both clients over `transport`.
    pub fn new(transport: Arc<dyn DriveTransport>) -> Self {
        Self {
            folders: FolderClient::new(Arc::clone(&transport)),
            files: FileClient::new(transport),
        }
    }
}

/// Strip path separators so a server-supplied name stays inside `dest`.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "download".to_string(),
        _ => cleaned,
    }
}
