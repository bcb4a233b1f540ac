//! # saveme-client
//!
//! Request/response plumbing for the SaveMe drive API.
//!
//! - [`transport::DriveTransport`] is the seam to the authenticated backend.
//! - [`http::HttpTransport`] implements it over `reqwest`.
//! - [`resource::FolderClient`] and [`resource::FileClient`] add local
//!   validation, idempotent deletes and download-to-disk on top.

pub mod http;
pub mod resource;
pub mod transport;

pub use http::HttpTransport;
pub use resource::{DeleteOutcome, DriveClient, FileClient, FolderClient, LocalFile, ResourceClient};
pub use transport::{ByteStream, DriveTransport};
