//! # saveme-core
//!
//! Core crate for the SaveMe drive client. Contains the configuration
//! schema, typed resource identifiers and the unified error system.
//!
//! This crate has **no** internal dependencies on other SaveMe crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
