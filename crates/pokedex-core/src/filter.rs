use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::BrowseConfig;
use crate::entity::Entity;
use crate::pagination::{PageView, Paginator};

/// Label of the catch-all entry in the type selector.
pub const ALL_TYPES_LABEL: &str = "All";

/// Categorical filter over entity types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    /// Parse a selector value; `"All"` selects everything.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_TYPES_LABEL {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_TYPES_LABEL,
            Self::Only(t) => t,
        }
    }

    pub fn accepts(&self, entity: &Entity) -> bool {
        match self {
            Self::All => true,
            Self::Only(t) => entity.has_type(t),
        }
    }
}

/// Text filter AND type filter over the catalog, viewed one page at a time.
pub struct FilterController {
    catalog: Arc<Catalog>,
    text: String,
    type_filter: TypeFilter,
    visible: Vec<Arc<Entity>>,
    pager: Paginator,
}

impl FilterController {
    pub fn new(catalog: Arc<Catalog>, config: &BrowseConfig) -> Self {
        let mut controller = Self {
            catalog,
            text: String::new(),
            type_filter: TypeFilter::All,
            visible: Vec::new(),
            pager: Paginator::new(config.page_size),
        };
        controller.recompute();
        controller
    }

    /// Change the free-text filter. A different value resets to page 1.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text;
        self.filters_changed();
    }

    /// Change the type filter. A different value resets to page 1.
    pub fn set_type(&mut self, filter: TypeFilter) {
        if filter == self.type_filter {
            return;
        }
        self.type_filter = filter;
        self.filters_changed();
    }

    fn filters_changed(&mut self) {
        self.pager.reset();
        self.recompute();
        tracing::debug!(
            text = %self.text,
            type_filter = self.type_filter.label(),
            visible = self.visible.len(),
            "Filters changed, back to page 1"
        );
    }

    fn recompute(&mut self) {
        let needle = self.text.to_lowercase();
        self.visible = self
            .catalog
            .iter()
            .filter(|e| e.name_contains(&needle) && self.type_filter.accepts(e))
            .map(Arc::clone)
            .collect();
        self.pager.set_total(self.visible.len());
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev()
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pager.go_to(page);
    }

    pub fn page(&self) -> PageView<Arc<Entity>> {
        self.pager.view(&self.visible)
    }

    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    /// Every entity passing both filters, in catalog order.
    pub fn visible(&self) -> &[Arc<Entity>] {
        &self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn type_filter(&self) -> &TypeFilter {
        &self.type_filter
    }

    /// Selector entries: `All` followed by every type in the catalog.
    pub fn type_options(&self) -> Vec<String> {
        std::iter::once(ALL_TYPES_LABEL.to_string())
            .chain(self.catalog.all_types())
            .collect()
    }
}
