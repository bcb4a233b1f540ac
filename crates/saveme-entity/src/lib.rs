//! # saveme-entity
//!
//! Resource models exchanged with the drive backend. Every struct in this
//! crate mirrors a JSON payload of the REST API and derives `Debug`,
//! `Clone`, `Serialize` and `Deserialize` with camelCase field names.

pub mod auth;
pub mod file;
pub mod folder;
pub mod resource;
pub mod timestamp;

pub use file::{File, format_file_size};
pub use folder::{Folder, FolderRequest};
pub use resource::{AnyResource, Resource};
