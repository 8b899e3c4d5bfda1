use std::time::Duration;

use serde::{Deserialize, Serialize};

use pokedex_core::config::BrowseConfig;

/// Data-driven configuration for the guessing game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessConfig {
    /// How long Higher/Lower feedback stays up, locking submissions (ms).
    pub feedback_delay_ms: u64,
    /// Settings for the embedded search box.
    pub search: BrowseConfig,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: 1000,
            search: BrowseConfig::default(),
        }
    }
}

impl GuessConfig {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }
}
