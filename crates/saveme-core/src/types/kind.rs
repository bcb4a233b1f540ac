//! Resource kinds and the composite selection key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::{FileId, FolderId};

/// The two kinds of resource the drive exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceKind {
    /// A stored file.
    File,
    /// A folder.
    Folder,
}

impl ResourceKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            other => Err(format!("unknown resource kind: {other}")),
        }
    }
}

/// A resource identity that cannot confuse files with folders.
///
/// The backend allocates file and folder ids from separate sequences, so the
/// raw number alone is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "UPPERCASE")]
pub enum ResourceKey {
    /// Key of a file.
    File(FileId),
    /// Key of a folder.
    Folder(FolderId),
}

impl ResourceKey {
    /// Build a key from a kind tag and a raw id.
    pub fn new(kind: ResourceKind, raw: i64) -> Self {
        match kind {
            ResourceKind::File => Self::File(FileId::new(raw)),
            ResourceKind::Folder => Self::Folder(FolderId::new(raw)),
        }
    }

    /// The kind half of the key.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::File(_) => ResourceKind::File,
            Self::Folder(_) => ResourceKind::Folder,
        }
    }

    /// The raw numeric id half of the key.
    pub fn raw_id(&self) -> i64 {
        match self {
            Self::File(id) => id.get(),
            Self::Folder(id) => id.get(),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.raw_id())
    }
}
