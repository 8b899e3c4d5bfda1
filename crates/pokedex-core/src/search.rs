use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::config::BrowseConfig;
use crate::entity::{Entity, EntityId};
use crate::timer::OneShotTimer;

/// Shown in place of the list when the effective query matches nothing.
pub const NO_MATCHES_LABEL: &str = "No matches found";

/// Shown in the selection slot before anything has been picked.
pub const SELECTION_PLACEHOLDER: &str = "SELECT A POKEMON";

/// What the suggestion dropdown should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestions<'a> {
    /// No dropdown at all.
    Hidden,
    /// Dropdown visible with a single "no matches" row.
    NoMatches,
    /// Dropdown visible with these entities, in catalog order.
    Matches(&'a [Arc<Entity>]),
}

/// Keys the engine reacts to while a suggestion row has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKey {
    Enter,
    Other,
}

/// Debounced autocomplete over the catalog, feeding one selection slot.
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    raw: String,
    query: String,
    /// Matches for `query`, recomputed only when the query settles.
    matches: Vec<Arc<Entity>>,
    open: bool,
    selection: Option<Arc<Entity>>,
    debounce: OneShotTimer,
    hide: OneShotTimer,
    debounce_delay: Duration,
    blur_grace: Duration,
}

impl SearchEngine {
    pub fn new(catalog: Arc<Catalog>, config: &BrowseConfig) -> Self {
        Self {
            catalog,
            raw: String::new(),
            query: String::new(),
            matches: Vec::new(),
            open: false,
            selection: None,
            debounce: OneShotTimer::new(),
            hide: OneShotTimer::new(),
            debounce_delay: config.search_debounce(),
            blur_grace: config.blur_grace(),
        }
    }

    /// Replace the raw input text. The effective query follows after the
    /// debounce window passes without further input.
    pub fn input(&mut self, text: impl Into<String>) {
        self.raw = text.into();
        self.open = true;
        self.debounce.arm(self.debounce_delay);
    }

    pub fn focus(&mut self) {
        self.open = true;
        self.hide.cancel();
    }

    /// Lose focus. The list stays up for the grace period so a pointer
    /// selection on it can still land.
    pub fn blur(&mut self) {
        self.hide.arm(self.blur_grace);
    }

    /// Advance both timers. Returns `true` if what should be rendered changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut changed = false;
        if self.debounce.advance(dt) {
            self.settle();
            changed = true;
        }
        if self.hide.advance(dt) {
            self.open = false;
            changed = true;
        }
        changed
    }

    fn settle(&mut self) {
        if self.query == self.raw {
            return;
        }
        self.query.clone_from(&self.raw);
        self.matches = if self.query.is_empty() {
            Vec::new()
        } else {
            self.catalog.search(&self.query)
        };
        tracing::debug!(
            query = %self.query,
            matches = self.matches.len(),
            "Search query settled"
        );
    }

    pub fn suggestions(&self) -> Suggestions<'_> {
        if !self.open || self.query.is_empty() {
            Suggestions::Hidden
        } else if self.matches.is_empty() {
            Suggestions::NoMatches
        } else {
            Suggestions::Matches(&self.matches)
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.suggestions(), Suggestions::Hidden)
    }

    /// Pick a suggestion from the visible list.
    ///
    /// Returns the selected entity for the owner to act on, or `None` when
    /// `id` is not currently offered (the call is then ignored).
    pub fn select(&mut self, id: EntityId) -> Option<Arc<Entity>> {
        let Suggestions::Matches(list) = self.suggestions() else {
            tracing::debug!(id, "Selection ignored, no suggestions shown");
            return None;
        };
        let Some(entity) = list.iter().find(|e| e.id == id).map(Arc::clone) else {
            tracing::debug!(id, "Selection ignored, not among suggestions");
            return None;
        };

        self.raw.clear();
        self.query.clear();
        self.matches.clear();
        self.debounce.cancel();
        self.hide.cancel();
        self.open = false;
        self.selection = Some(Arc::clone(&entity));
        tracing::debug!(id, name = %entity.name, "Suggestion selected");
        Some(entity)
    }

    /// Keyboard activation on a focused suggestion row.
    pub fn key_down(&mut self, id: EntityId, key: SuggestionKey) -> Option<Arc<Entity>> {
        match key {
            SuggestionKey::Enter => self.select(id),
            SuggestionKey::Other => None,
        }
    }

    pub fn selection(&self) -> Option<&Arc<Entity>> {
        self.selection.as_ref()
    }

    /// Caption for the selection slot.
    pub fn selection_label(&self) -> &str {
        self.selection
            .as_ref()
            .map_or(SELECTION_PLACEHOLDER, |e| e.name.as_str())
    }

    pub fn raw_input(&self) -> &str {
        &self.raw
    }

    pub fn effective_query(&self) -> &str {
        &self.query
    }

    /// Whether typed text is still waiting out the debounce window.
    pub fn has_pending_query(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}
