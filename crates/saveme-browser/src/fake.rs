//! In-memory drive backend for unit tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use futures::stream;

use saveme_client::{ByteStream, DriveTransport};
use saveme_core::error::AppError;
use saveme_core::result::AppResult;
use saveme_core::types::{FileId, FolderId, UserId};
use saveme_entity::{File, Folder, FolderRequest};

pub fn sample_folder(id: i64, name: &str, parent: Option<i64>) -> Folder {
    Folder {
        id: FolderId::new(id),
        name: name.to_string(),
        owner_id: UserId::new(1),
        owner_username: "mario".into(),
        parent_folder_id: parent.map(FolderId::new),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_file(id: i64, name: &str, folder: Option<i64>) -> File {
    File {
        id: FileId::new(id),
        original_file_name: name.to_string(),
        content_type: "application/octet-stream".into(),
        size: 0,
        owner_id: UserId::new(1),
        owner_username: "mario".into(),
        folder_id: folder.map(FolderId::new),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    folders: BTreeMap<i64, Folder>,
    files: BTreeMap<i64, (File, Bytes)>,
    failing_uploads: HashSet<String>,
    failing_deletes: HashSet<i64>,
    fail_file_listing: bool,
    fail_create: bool,
    list_delays: HashMap<Option<i64>, Duration>,
    upload_delays: HashMap<String, Duration>,
    get_folder_delays: HashMap<i64, Duration>,
    deletes: Vec<String>,
}

/// Folders and files kept in maps, with switches for injected failures.
#[derive(Default)]
pub struct MemoryDrive {
    inner: Mutex<Inner>,
    get_folder_calls: AtomicUsize,
    create_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MemoryDrive {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1000,
                ..Inner::default()
            }),
            ..Self::default()
        }
    }

    pub fn add_folder(&self, id: i64, name: &str, parent: Option<i64>) {
        self.inner
            .lock()
            .unwrap()
            .folders
            .insert(id, sample_folder(id, name, parent));
    }

    pub fn add_file(&self, id: i64, name: &str, folder: Option<i64>) {
        self.inner
            .lock()
            .unwrap()
            .files
            .insert(id, (sample_file(id, name, folder), Bytes::new()));
    }

    pub fn fail_upload_of(&self, name: &str) {
        self.inner
            .lock()
            .unwrap()
            .failing_uploads
            .insert(name.to_string());
    }

    pub fn fail_delete_of(&self, id: i64) {
        self.inner.lock().unwrap().failing_deletes.insert(id);
    }

    pub fn fail_file_listing(&self) {
        self.inner.lock().unwrap().fail_file_listing = true;
    }

    pub fn fail_create(&self) {
        self.inner.lock().unwrap().fail_create = true;
    }

    pub fn delay_listing(&self, parent: Option<i64>, delay: Duration) {
        self.inner.lock().unwrap().list_delays.insert(parent, delay);
    }

    pub fn delay_upload(&self, name: &str, delay: Duration) {
        self.inner
            .lock()
            .unwrap()
            .upload_delays
            .insert(name.to_string(), delay);
    }

    pub fn delay_get_folder(&self, id: i64, delay: Duration) {
        self.inner
            .lock()
            .unwrap()
            .get_folder_delays
            .insert(id, delay);
    }

    pub fn get_folder_calls(&self) -> usize {
        self.get_folder_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Folder-list requests issued, a proxy for navigations.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Delete requests in dispatch order, as `file:ID` / `folder:ID`.
    pub fn deletes(&self) -> Vec<String> {
        self.inner.lock().unwrap().deletes.clone()
    }

    pub fn file_names_in(&self, folder: Option<i64>) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .files
            .values()
            .filter(|(f, _)| f.folder_id.map(|p| p.get()) == folder)
            .map(|(f, _)| f.original_file_name.clone())
            .collect()
    }

    fn list_delay(&self, parent: Option<FolderId>) -> Option<Duration> {
        self.inner
            .lock()
            .unwrap()
            .list_delays
            .get(&parent.map(|p| p.get()))
            .copied()
    }
}

#[async_trait]
impl DriveTransport for MemoryDrive {
    async fn list_folders(&self, parent: Option<FolderId>) -> AppResult<Vec<Folder>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.list_delay(parent) {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .inner
            .lock()
            .unwrap()
            .folders
            .values()
            .filter(|f| f.parent_folder_id == parent)
            .cloned()
            .collect())
    }

    async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        self.get_folder_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self
            .inner
            .lock()
            .unwrap()
            .get_folder_delays
            .get(&id.get())
            .copied();
        match delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
        self.inner
            .lock()
            .unwrap()
            .folders
            .get(&id.get())
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    async fn create_folder(&self, request: &FolderRequest) -> AppResult<Folder> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_create {
            return Err(AppError::server("500 Internal Server Error"));
        }
        inner.next_id += 1;
        let id = inner.next_id;
        let folder = sample_folder(
            id,
            &request.name,
            request.parent_folder_id.map(|p| p.get()),
        );
        inner.folders.insert(id, folder.clone());
        Ok(folder)
    }

    async fn update_folder(&self, id: FolderId, request: &FolderRequest) -> AppResult<Folder> {
        let mut inner = self.inner.lock().unwrap();
        let folder = inner
            .folders
            .get_mut(&id.get())
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = request.name.clone();
        Ok(folder.clone())
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        tokio::task::yield_now().await;
        let mut inner = self.inner.lock().unwrap();
        inner.deletes.push(format!("folder:{id}"));
        if inner.failing_deletes.contains(&id.get()) {
            return Err(AppError::server("500 Internal Server Error"));
        }
        inner
            .folders
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    async fn list_files(&self, folder: Option<FolderId>) -> AppResult<Vec<File>> {
        if let Some(delay) = self.list_delay(folder) {
            tokio::time::sleep(delay).await;
        }
        let inner = self.inner.lock().unwrap();
        if inner.fail_file_listing {
            return Err(AppError::network("connection reset"));
        }
        Ok(inner
            .files
            .values()
            .map(|(f, _)| f)
            .filter(|f| f.folder_id == folder)
            .cloned()
            .collect())
    }

    async fn get_file(&self, id: FileId) -> AppResult<File> {
        self.inner
            .lock()
            .unwrap()
            .files
            .get(&id.get())
            .map(|(f, _)| f.clone())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn upload_file(
        &self,
        file_name: &str,
        bytes: Bytes,
        folder: Option<FolderId>,
    ) -> AppResult<File> {
        let delay = self
            .inner
            .lock()
            .unwrap()
            .upload_delays
            .get(file_name)
            .copied();
        match delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        let mut inner = self.inner.lock().unwrap();
        if inner.failing_uploads.contains(file_name) {
            return Err(AppError::server("413 Payload Too Large"));
        }
        inner.next_id += 1;
        let id = inner.next_id;
        let mut file = sample_file(id, file_name, folder.map(|p| p.get()));
        file.size = bytes.len() as u64;
        inner.files.insert(id, (file.clone(), bytes));
        Ok(file)
    }

    async fn download_file(&self, id: FileId) -> AppResult<ByteStream> {
        let data = self
            .inner
            .lock()
            .unwrap()
            .files
            .get(&id.get())
            .map(|(_, b)| b.clone())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        Ok(Box::pin(stream::iter(vec![Ok(data)])))
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        tokio::task::yield_now().await;
        let mut inner = self.inner.lock().unwrap();
        inner.deletes.push(format!("file:{id}"));
        if inner.failing_deletes.contains(&id.get()) {
            return Err(AppError::server("500 Internal Server Error"));
        }
        inner
            .files
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }
}
