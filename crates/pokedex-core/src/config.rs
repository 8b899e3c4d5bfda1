use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Data-driven configuration for the browsing views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Quiet period before typed search text becomes the effective query (ms).
    pub search_debounce_ms: u64,
    /// Delay between losing focus and hiding the suggestion list (ms).
    pub blur_grace_ms: u64,
    /// Entities per page in list views.
    pub page_size: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            blur_grace_ms: 200,
            page_size: 12,
        }
    }
}

impl BrowseConfig {
    /// Replace values that would break paging.
    pub fn sanitized(mut self) -> Self {
        if self.page_size == 0 {
            tracing::warn!("page_size must be > 0, using 1");
            self.page_size = 1;
        }
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}
