//! The capability set shared by files and folders.

use std::fmt;
use std::hash::Hash;

use saveme_core::types::{FolderId, ResourceKey, ResourceKind};
use serde::{Deserialize, Serialize};

use crate::file::File;
use crate::folder::Folder;

/// Behaviour common to every drive resource.
pub trait Resource: Clone + fmt::Debug + Send + Sync + 'static {
    /// The typed identifier of this resource kind.
    type Id: Copy + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Kind tag of this resource.
    const KIND: ResourceKind;

    /// The resource identifier.
    fn id(&self) -> Self::Id;

    /// Display name.
    fn name(&self) -> &str;

    /// Containing folder, `None` at root level.
    fn parent_id(&self) -> Option<FolderId>;

    /// Composite (kind, id) key.
    fn key(&self) -> ResourceKey;
}

impl Resource for File {
    type Id = saveme_core::types::FileId;

    const KIND: ResourceKind = ResourceKind::File;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.original_file_name
    }

    fn parent_id(&self) -> Option<FolderId> {
        self.folder_id
    }

    fn key(&self) -> ResourceKey {
        ResourceKey::File(self.id)
    }
}

impl Resource for Folder {
    type Id = FolderId;

    const KIND: ResourceKind = ResourceKind::Folder;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_id(&self) -> Option<FolderId> {
        self.parent_folder_id
    }

    fn key(&self) -> ResourceKey {
        ResourceKey::Folder(self.id)
    }
}

/// A snapshot of either resource kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum AnyResource {
    /// A file snapshot.
    File(File),
    /// A folder snapshot.
    Folder(Folder),
}

impl AnyResource {
    /// Kind tag of the wrapped resource.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::File(_) => ResourceKind::File,
            Self::Folder(_) => ResourceKind::Folder,
        }
    }

    /// Composite key of the wrapped resource.
    pub fn key(&self) -> ResourceKey {
        match self {
            Self::File(f) => f.key(),
            Self::Folder(f) => f.key(),
        }
    }

    /// Display name of the wrapped resource.
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Folder(f) => f.name(),
        }
    }
}

impl From<File> for AnyResource {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<Folder> for AnyResource {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}
