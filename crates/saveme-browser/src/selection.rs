//! Multi-selection across files and folders.

use saveme_core::types::{ResourceKey, ResourceKind};
use saveme_entity::AnyResource;

/// One selected resource.
#[derive(Debug, Clone)]
pub struct SelectionEntry {
    /// Composite identity of the selected resource.
    pub key: ResourceKey,
    /// Snapshot taken when the resource was selected.
    pub resource: AnyResource,
}

impl SelectionEntry {
    /// Kind tag of the selected resource.
    pub fn kind(&self) -> ResourceKind {
        self.key.kind()
    }
}

/// Selected resources in insertion order, keyed by (kind, id).
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    entries: Vec<SelectionEntry>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the resource, or deselect it if already selected.
    ///
    /// Returns whether the resource is selected afterwards.
    pub fn toggle(&mut self, resource: impl Into<AnyResource>) -> bool {
        let resource = resource.into();
        let key = resource.key();
        match self.position(&key) {
            Some(idx) => {
                self.entries.remove(idx);
                false
            }
            None => {
                self.entries.push(SelectionEntry { key, resource });
                true
            }
        }
    }

    /// Whether the resource with this raw id and kind is selected.
    pub fn is_selected(&self, id: i64, kind: ResourceKind) -> bool {
        self.contains(&ResourceKey::new(kind, id))
    }

    /// Whether `key` is selected.
    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.position(key).is_some()
    }

    /// Number of selected resources.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Selected entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    fn position(&self, key: &ResourceKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == *key)
    }
}
