//! Ancestor chain reconstruction for the navigation trail.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use saveme_client::{FolderClient, ResourceClient};
use saveme_core::error::AppError;
use saveme_core::result::AppResult;
use saveme_core::types::FolderId;
use saveme_entity::Folder;

/// Rebuilds the root-to-folder path by walking parent references.
#[derive(Clone)]
pub struct BreadcrumbResolver {
    folders: FolderClient,
    max_depth: usize,
}

impl BreadcrumbResolver {
    /// Create a resolver that gives up after `max_depth` ancestor hops.
    pub fn new(folders: FolderClient, max_depth: usize) -> Self {
        Self { folders, max_depth }
    }

    /// Fetch folder `id` and resolve its chain.
    pub async fn resolve_id(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        let start = self.folders.get(id).await?;
        self.resolve(start).await
    }

    /// Resolve the chain from the root down to `start`, inclusive.
    ///
    /// Fails with `CycleOrDepthExceeded` when a folder repeats or the hop
    /// bound is hit; any fetch failure is returned as-is and no partial
    /// chain is produced.
    pub async fn resolve(&self, start: Folder) -> AppResult<Vec<Folder>> {
        let mut visited = HashSet::from([start.id]);
        let mut next = start.parent_folder_id;
        let mut chain = VecDeque::from([start]);
        let mut hops = 0usize;

        while let Some(parent_id) = next {
            if hops >= self.max_depth {
                return Err(AppError::cycle_or_depth_exceeded(format!(
                    "Folder ancestry deeper than {} levels",
                    self.max_depth
                )));
            }
            if !visited.insert(parent_id) {
                return Err(AppError::cycle_or_depth_exceeded(format!(
                    "Folder {parent_id} appears twice in its own ancestry"
                )));
            }

            let parent = self.folders.get(parent_id).await?;
            hops += 1;
            next = parent.parent_folder_id;
            chain.push_front(parent);
        }

        debug!(depth = hops, "Breadcrumbs resolved");
        Ok(chain.into())
    }
}
