//! `reqwest` implementation of [`DriveTransport`].

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use saveme_core::config::api::ApiConfig;
use saveme_core::error::{AppError, ErrorKind};
use saveme_core::result::AppResult;
use saveme_core::types::{FileId, FolderId};
use saveme_entity::auth::{AuthResponse, LoginRequest};
use saveme_entity::{File, Folder, FolderRequest};

use crate::transport::{ByteStream, DriveTransport};

/// Longest slice of an error body echoed into error messages.
const MAX_ERROR_BODY: usize = 200;

/// HTTP transport talking to the drive backend under `{base_url}/api`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Build a transport from the API configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to create HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            api_base: format!("{}/api", config.base_url.trim_end_matches('/')),
            token: config.token.clone(),
        })
    }

    /// Replace the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        send_json(self.request(Method::POST, "/auth/login").json(&body)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        debug!(%method, %url, "Dispatching request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl DriveTransport for HttpTransport {
    async fn list_folders(&self, parent: Option<FolderId>) -> AppResult<Vec<Folder>> {
        let path = match parent {
            Some(id) => format!("/folders?parentFolderId={id}"),
            None => "/folders".to_string(),
        };
        send_json(self.request(Method::GET, &path)).await
    }

    async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        send_json(self.request(Method::GET, &format!("/folders/{id}"))).await
    }

    async fn create_folder(&self, request: &FolderRequest) -> AppResult<Folder> {
        send_json(self.request(Method::POST, "/folders").json(request)).await
    }

    async fn update_folder(&self, id: FolderId, request: &FolderRequest) -> AppResult<Folder> {
        send_json(
            self.request(Method::PUT, &format!("/folders/{id}"))
                .json(request),
        )
        .await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        send(self.request(Method::DELETE, &format!("/folders/{id}"))).await?;
        Ok(())
    }

    async fn list_files(&self, folder: Option<FolderId>) -> AppResult<Vec<File>> {
        let path = match folder {
            Some(id) => format!("/files?folderId={id}"),
            None => "/files".to_string(),
        };
        send_json(self.request(Method::GET, &path)).await
    }

    async fn get_file(&self, id: FileId) -> AppResult<File> {
        send_json(self.request(Method::GET, &format!("/files/{id}"))).await
    }

    async fn upload_file(
        &self,
        file_name: &str,
        bytes: Bytes,
        folder: Option<FolderId>,
    ) -> AppResult<File> {
        let mime = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string();
        let part = Part::bytes(bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str(&mime)
            .map_err(map_reqwest_error)?;

        let mut form = Form::new().part("file", part);
        if let Some(id) = folder {
            form = form.text("folderId", id.to_string());
        }

        send_json(self.request(Method::POST, "/files/upload").multipart(form)).await
    }

    async fn download_file(&self, id: FileId) -> AppResult<ByteStream> {
        let response = send(self.request(Method::GET, &format!("/files/{id}/download"))).await?;
        let stream = response.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::pin(stream))
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        send(self.request(Method::DELETE, &format!("/files/{id}"))).await?;
        Ok(())
    }
}

async fn send(builder: RequestBuilder) -> AppResult<Response> {
    let response = builder.send().await.map_err(map_reqwest_error)?;
    check_status(response).await
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> AppResult<T> {
    send(builder)
        .await?
        .json::<T>()
        .await
        .map_err(map_reqwest_error)
}

/// Translate a non-success status into the error taxonomy.
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let detail: String = body.chars().take(MAX_ERROR_BODY).collect();
    let message = if detail.is_empty() {
        format!("{status} from {url}")
    } else {
        format!("{status} from {url}: {detail}")
    };

    Err(AppError::new(kind_for_status(status), message))
}

/// Map an HTTP status to the error kind it represents.
pub fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::Authentication,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Validation,
        _ => ErrorKind::Server,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AppError {
    if err.is_decode() {
        return AppError::with_source(
            ErrorKind::Serialization,
            format!("Malformed response body: {err}"),
            err,
        );
    }
    if let Some(status) = err.status() {
        return AppError::with_source(kind_for_status(status), err.to_string(), err);
    }
    AppError::with_source(ErrorKind::Network, format!("Request failed: {err}"), err)
}
