//! Core type definitions used across the SaveMe workspace.

pub mod id;
pub mod kind;

pub use id::*;
pub use kind::{ResourceKey, ResourceKind};
