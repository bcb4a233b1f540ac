//! File entity model.

use chrono::{DateTime, Utc};
use saveme_core::types::{FileId, FolderId, UserId};
use serde::{Deserialize, Serialize};

/// A file stored on the drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The name the file was uploaded with.
    pub original_file_name: String,
    /// MIME type reported by the server.
    pub content_type: String,
    /// File size in bytes.
    pub size: u64,
    /// The owning user.
    pub owner_id: UserId,
    /// Denormalized owner name.
    pub owner_username: String,
    /// Containing folder (`None` at root level).
    pub folder_id: Option<FolderId>,
    /// When the file was uploaded.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.original_file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.original_file_name)
            .map(|ext| ext.to_lowercase())
    }

    /// Human-readable size.
    pub fn display_size(&self) -> String {
        super::format_file_size(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "id": 10,
        "originalFileName": "Report.PDF",
        "contentType": "application/pdf",
        "size": 1536,
        "ownerId": 1,
        "ownerUsername": "mario",
        "folderId": null,
        "createdAt": "2024-03-01T10:15:30.123",
        "updatedAt": "2024-03-01T10:15:30.123"
    }"#;

    #[test]
    fn test_deserialize_backend_payload() {
        let file: File = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(file.id, FileId::new(10));
        assert_eq!(file.folder_id, None);
        assert_eq!(file.owner_username, "mario");
        assert_eq!(file.display_size(), "1.5 KB");
    }

    #[test]
    fn test_extension() {
        let file: File = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(file.extension().as_deref(), Some("pdf"));

        let bare = File {
            original_file_name: "Makefile".into(),
            ..file
        };
        assert_eq!(bare.extension(), None);
    }
}
