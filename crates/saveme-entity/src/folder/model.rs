//! Folder entity model.

use chrono::{DateTime, Utc};
use saveme_core::types::{FolderId, UserId};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A folder in the drive hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// The owning user.
    pub owner_id: UserId,
    /// Denormalized owner name.
    pub owner_username: String,
    /// Parent folder ID (`None` for root-level folders).
    pub parent_folder_id: Option<FolderId>,
    /// When the folder was created.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_folder_id.is_none()
    }
}

/// Body of the create and rename folder requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FolderRequest {
    /// Folder name, 1 to 255 characters and not blank.
    #[validate(
        length(min = 1, max = 255, message = "folder name must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    /// Parent folder (`None` for root level).
    pub parent_folder_id: Option<FolderId>,
}

impl FolderRequest {
    /// Build a request body.
    pub fn new(name: impl Into<String>, parent_folder_id: Option<FolderId>) -> Self {
        Self {
            name: name.into(),
            parent_folder_id,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("folder name cannot be blank".into());
        return Err(err);
    }
    Ok(())
}
