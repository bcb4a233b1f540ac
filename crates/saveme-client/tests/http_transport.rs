//! Drives `HttpTransport` and the resource clients against an in-process
//! fake of the drive backend.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;

use saveme_client::{DeleteOutcome, DriveClient, HttpTransport, LocalFile, ResourceClient};
use saveme_core::ErrorKind;
use saveme_core::config::api::ApiConfig;
use saveme_core::types::{FileId, FolderId, UserId};
use saveme_entity::{File, Folder, FolderRequest};

const TOKEN: &str = "secret-token";

#[derive(Default)]
struct FakeDrive {
    next_id: i64,
    folders: BTreeMap<i64, Folder>,
    files: BTreeMap<i64, (File, Bytes)>,
    create_calls: usize,
}

impl FakeDrive {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn folder(&mut self, name: &str, parent: Option<i64>) -> Folder {
        let id = self.allocate();
        let folder = Folder {
            id: FolderId::new(id),
            name: name.to_string(),
            owner_id: UserId::new(1),
            owner_username: "mario".into(),
            parent_folder_id: parent.map(FolderId::new),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.folders.insert(id, folder.clone());
        folder
    }
}

type Shared = Arc<Mutex<FakeDrive>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TOKEN}"))
        .unwrap_or(false)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FolderQuery {
    parent_folder_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileQuery {
    folder_id: Option<i64>,
}

async fn list_folders(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<FolderQuery>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let drive = state.lock().unwrap();
    let folders: Vec<Folder> = drive
        .folders
        .values()
        .filter(|f| f.parent_folder_id.map(|p| p.get()) == q.parent_folder_id)
        .cloned()
        .collect();
    Json(folders).into_response()
}

async fn create_folder(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<FolderRequest>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut drive = state.lock().unwrap();
    drive.create_calls += 1;
    let folder = drive.folder(&body.name, body.parent_folder_id.map(|p| p.get()));
    Json(folder).into_response()
}

async fn get_folder(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.lock().unwrap().folders.get(&id) {
        Some(folder) => Json(folder.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_folder(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<FolderRequest>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut drive = state.lock().unwrap();
    match drive.folders.get_mut(&id) {
        Some(folder) => {
            folder.name = body.name;
            Json(folder.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_folder(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.lock().unwrap().folders.remove(&id) {
        Some(_) => (StatusCode::OK, "Folder deleted").into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn list_files(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<FileQuery>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let drive = state.lock().unwrap();
    let files: Vec<File> = drive
        .files
        .values()
        .map(|(f, _)| f)
        .filter(|f| f.folder_id.map(|p| p.get()) == q.folder_id)
        .cloned()
        .collect();
    Json(files).into_response()
}

async fn upload_file(
    State(state): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut name = None;
    let mut content_type = None;
    let mut data = Bytes::new();
    let mut folder = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("file") => {
                name = field.file_name().map(str::to_string);
                content_type = field.content_type().map(str::to_string);
                data = field.bytes().await.unwrap();
            }
            Some("folderId") => {
                folder = field.text().await.unwrap().parse::<i64>().ok();
            }
            _ => {}
        }
    }

    let Some(name) = name else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut drive = state.lock().unwrap();
    let id = drive.allocate();
    let file = File {
        id: FileId::new(id),
        original_file_name: name,
        content_type: content_type.unwrap_or_default(),
        size: data.len() as u64,
        owner_id: UserId::new(1),
        owner_username: "mario".into(),
        folder_id: folder.map(FolderId::new),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    drive.files.insert(id, (file.clone(), data));
    Json(file).into_response()
}

async fn get_file(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.lock().unwrap().files.get(&id) {
        Some((file, _)) => Json(file.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn download_file(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.lock().unwrap().files.get(&id) {
        Some((_, data)) => data.clone().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_file(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.lock().unwrap().files.remove(&id) {
        Some(_) => StatusCode::OK.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn login(Json(body): Json<Credentials>) -> Response {
    if body.username == "mario" && body.password == "pizza" {
        Json(serde_json::json!({
            "token": TOKEN,
            "type": "Bearer",
            "id": 1,
            "username": "mario",
            "email": "mario@example.org"
        }))
        .into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

/// Start the fake backend and return its base URL and shared state.
async fn spawn_backend() -> (String, Shared) {
    let state: Shared = Arc::new(Mutex::new(FakeDrive::default()));

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/folders", get(list_folders).post(create_folder))
        .route(
            "/api/folders/{id}",
            get(get_folder).put(update_folder).delete(delete_folder),
        )
        .route("/api/files", get(list_files))
        .route("/api/files/upload", post(upload_file))
        .route("/api/files/{id}", get(get_file).delete(delete_file))
        .route("/api/files/{id}/download", get(download_file))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

fn client_for(base_url: &str, token: Option<&str>) -> DriveClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        token: token.map(str::to_string),
        ..ApiConfig::default()
    };
    DriveClient::new(Arc::new(HttpTransport::new(&config).unwrap()))
}

#[tokio::test]
async fn test_login_returns_token() {
    let (url, _state) = spawn_backend().await;
    let transport = HttpTransport::new(&ApiConfig {
        base_url: url,
        ..ApiConfig::default()
    })
    .unwrap();

    let auth = transport.login("mario", "pizza").await.unwrap();
    assert_eq!(auth.token, TOKEN);
    assert_eq!(auth.token_type, "Bearer");

    let err = transport.login("mario", "wrong").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_missing_token_is_authentication_error() {
    let (url, _state) = spawn_backend().await;
    let client = client_for(&url, None);

    let err = client.folders.list(None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_folder_lifecycle() {
    let (url, _state) = spawn_backend().await;
    let client = client_for(&url, Some(TOKEN));

    let docs = client.folders.create(None, "Docs").await.unwrap();
    let reports = client.folders.create(Some(docs.id), "Reports").await.unwrap();
    assert_eq!(reports.parent_folder_id, Some(docs.id));

    let roots = client.folders.list(None).await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].name, "Docs");

    let children = client.folders.list(Some(docs.id)).await.unwrap();
    assert_eq!(children.len(), 1);

    let renamed = client
        .folders
        .rename(reports.id, Some(docs.id), "Quarterly")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Quarterly");

    let fetched = client.folders.get(reports.id).await.unwrap();
    assert_eq!(fetched.name, "Quarterly");
}

#[tokio::test]
async fn test_invalid_folder_name_never_dispatched() {
    let (url, state) = spawn_backend().await;
    let client = client_for(&url, Some(TOKEN));

    let err = client.folders.create(None, "   ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = client
        .folders
        .create(None, &"x".repeat(256))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    assert_eq!(state.lock().unwrap().create_calls, 0);
}

#[tokio::test]
async fn test_get_missing_folder_is_not_found() {
    let (url, _state) = spawn_backend().await;
    let client = client_for(&url, Some(TOKEN));

    let err = client.folders.get(FolderId::new(999)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (url, _state) = spawn_backend().await;
    let client = client_for(&url, Some(TOKEN));

    let folder = client.folders.create(None, "Tmp").await.unwrap();
    assert_eq!(
        client.folders.delete(folder.id).await.unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(
        client.folders.delete(folder.id).await.unwrap(),
        DeleteOutcome::AlreadyGone
    );
}

#[tokio::test]
async fn test_upload_list_download_delete_file() {
    let (url, _state) = spawn_backend().await;
    let client = client_for(&url, Some(TOKEN));

    let folder = client.folders.create(None, "Inbox").await.unwrap();
    let uploaded = client
        .files
        .upload(LocalFile::new("notes.txt", "hello drive"), Some(folder.id))
        .await
        .unwrap();
    assert_eq!(uploaded.original_file_name, "notes.txt");
    assert_eq!(uploaded.content_type, "text/plain");
    assert_eq!(uploaded.size, 11);
    assert_eq!(uploaded.folder_id, Some(folder.id));

    let in_folder = client.files.list(Some(folder.id)).await.unwrap();
    assert_eq!(in_folder.len(), 1);
    assert!(client.files.list(None).await.unwrap().is_empty());

    let bytes = client.files.download(uploaded.id).await.unwrap();
    assert_eq!(&bytes[..], b"hello drive");

    let dir = tempfile::tempdir().unwrap();
    let (path, written) = client
        .files
        .download_to(uploaded.id, dir.path())
        .await
        .unwrap();
    assert_eq!(written, 11);
    assert_eq!(path, dir.path().join("notes.txt"));
    assert_eq!(std::fs::read(&path).unwrap(), b"hello drive");

    assert_eq!(
        client.files.delete(uploaded.id).await.unwrap(),
        DeleteOutcome::Deleted
    );
    let err = client.files.get(uploaded.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}"), Some(TOKEN));
    let err = client.files.list(None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
}
