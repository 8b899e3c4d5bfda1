use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::BrowseConfig;
use crate::entity::Entity;
use crate::search::SearchEngine;

/// Which of the two comparison slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Two independent searches over the same catalog, one per slot.
pub struct CompareSelector {
    left: SearchEngine,
    right: SearchEngine,
}

impl CompareSelector {
    pub fn new(catalog: Arc<Catalog>, config: &BrowseConfig) -> Self {
        Self {
            left: SearchEngine::new(Arc::clone(&catalog), config),
            right: SearchEngine::new(catalog, config),
        }
    }

    pub fn slot(&self, side: Side) -> &SearchEngine {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut SearchEngine {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Advance both slots' timers. Returns `true` if either changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let left = self.left.advance(dt);
        let right = self.right.advance(dt);
        left || right
    }

    pub fn selection(&self, side: Side) -> Option<&Arc<Entity>> {
        self.slot(side).selection()
    }

    /// Caption under a slot once something is selected.
    pub fn caption(&self, side: Side) -> Option<String> {
        self.selection(side).map(|e| format!("Selected: {}", e.name))
    }
}
