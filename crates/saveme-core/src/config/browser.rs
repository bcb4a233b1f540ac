//! Browsing workflow configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for navigation and batch operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Maximum ancestor hops when rebuilding breadcrumbs.
    #[serde(default = "default_max_breadcrumb_depth")]
    pub max_breadcrumb_depth: usize,
    /// Pause after a batch upload settles so the final progress is visible.
    #[serde(default = "default_upload_grace_ms")]
    pub upload_grace_ms: u64,
    /// Upper bound on in-flight requests within one batch.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

impl BrowserConfig {
    /// Upload grace period as a [`Duration`].
    pub fn upload_grace(&self) -> Duration {
        Duration::from_millis(self.upload_grace_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            max_breadcrumb_depth: default_max_breadcrumb_depth(),
            upload_grace_ms: default_upload_grace_ms(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

fn default_max_breadcrumb_depth() -> usize {
    1000
}

fn default_upload_grace_ms() -> u64 {
    500
}

fn default_max_concurrent_requests() -> usize {
    8
}
