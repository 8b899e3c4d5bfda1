use std::sync::Arc;

use crate::catalog::Catalog;
use crate::entity::{Entity, EntityId};
use crate::error::PersistError;
use crate::pagination::{PageView, Paginator};

/// Shown instead of the grid when nothing has been favourited.
pub const EMPTY_FAVOURITES_LABEL: &str = "NO FAVOURITES ADDED YET";

/// Durable storage for the favourites list, as a plain list of ids.
pub trait FavouritesRepository {
    fn load(&self) -> Result<Vec<EntityId>, PersistError>;
    fn save(&self, ids: &[EntityId]) -> Result<(), PersistError>;
}

/// Set of favourited entity ids, listed oldest first, viewed one page at a time.
#[derive(Debug, Clone)]
pub struct FavouritesStore {
    ids: Vec<EntityId>,
    pager: Paginator,
}

impl FavouritesStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            ids: Vec::new(),
            pager: Paginator::new(page_size),
        }
    }

    /// Rebuild from a persisted list, dropping repeated ids (first one wins).
    pub fn from_ids(ids: impl IntoIterator<Item = EntityId>, page_size: usize) -> Self {
        let mut store = Self::new(page_size);
        for id in ids {
            if !store.ids.contains(&id) {
                store.ids.push(id);
            }
        }
        store.pager.set_total(store.ids.len());
        store
    }

    /// Load through a repository; a failing repository yields an empty store.
    pub fn load_from(repo: &dyn FavouritesRepository, page_size: usize) -> Self {
        match repo.load() {
            Ok(ids) => Self::from_ids(ids, page_size),
            Err(e) => {
                tracing::warn!(error = %e, "Could not load favourites, starting empty");
                Self::new(page_size)
            },
        }
    }

    pub fn save_to(&self, repo: &dyn FavouritesRepository) -> Result<(), PersistError> {
        repo.save(&self.ids)
    }

    /// Add `id`. Returns `false` if it was already present.
    pub fn add(&mut self, id: EntityId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        self.changed();
        true
    }

    /// Remove `id`. Returns `false` if it was not present.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(pos) = self.ids.iter().position(|&f| f == id) else {
            return false;
        };
        self.ids.remove(pos);
        self.changed();
        true
    }

    /// Flip membership. Returns whether `id` is a favourite afterwards.
    pub fn toggle(&mut self, id: EntityId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.add(id)
        }
    }

    fn changed(&mut self) {
        self.pager.set_total(self.ids.len());
        self.pager.reset();
        tracing::debug!(count = self.ids.len(), "Favourites changed, back to page 1");
    }

    pub fn is_favourite(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
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

    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    /// Current page of ids.
    pub fn page_ids(&self) -> PageView<EntityId> {
        self.pager.view(&self.ids)
    }

    /// Current page resolved against the catalog. Ids the catalog does not
    /// know are left out of `items`; paging still counts them.
    pub fn page(&self, catalog: &Catalog) -> PageView<Arc<Entity>> {
        let ids = self.page_ids();
        PageView {
            items: ids
                .items
                .iter()
                .filter_map(|&id| catalog.get(id).map(Arc::clone))
                .collect(),
            current_page: ids.current_page,
            total_pages: ids.total_pages,
            has_prev: ids.has_prev,
            has_next: ids.has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MemoryRepository, sample_catalog};

    #[test]
    fn toggle_adds_then_removes() {
        let mut favs = FavouritesStore::new(12);
        assert!(favs.toggle(25));
        assert!(favs.is_favourite(25));
        assert!(!favs.toggle(25));
        assert!(!favs.is_favourite(25));
        assert!(favs.is_empty());
    }

    #[test]
    fn add_and_remove_are_idempotent() {
        let mut favs = FavouritesStore::new(12);
        assert!(favs.add(1));
        assert!(!favs.add(1));
        assert_eq!(favs.len(), 1);
        assert!(favs.remove(1));
        assert!(!favs.remove(1));
        assert!(favs.is_empty());
    }

    #[test]
    fn listing_is_oldest_first() {
        let mut favs = FavouritesStore::new(12);
        favs.add(25);
        favs.add(1);
        favs.add(4);
        assert_eq!(favs.ids(), &[25, 1, 4]);
    }

    #[test]
    fn removal_on_last_page_clamps_to_first() {
        let mut favs = FavouritesStore::from_ids(1..=13, 12);
        assert_eq!(favs.total_pages(), 2);
        assert!(favs.next_page());
        assert_eq!(favs.current_page(), 2);

        favs.remove(13);
        assert_eq!(favs.total_pages(), 1);
        assert_eq!(favs.current_page(), 1);
    }

    #[test]
    fn structural_change_resets_cursor() {
        let mut favs = FavouritesStore::from_ids(1..=30, 12);
        favs.go_to_page(3);
        favs.add(31);
        assert_eq!(favs.current_page(), 1);
    }

    #[test]
    fn no_op_calls_keep_cursor() {
        let mut favs = FavouritesStore::from_ids(1..=30, 12);
        favs.go_to_page(3);
        favs.add(5);
        favs.remove(99);
        assert_eq!(favs.current_page(), 3);
    }

    #[test]
    fn membership_query_has_no_side_effect() {
        let favs = FavouritesStore::from_ids([7], 12);
        let before = favs.ids().to_vec();
        assert!(favs.is_favourite(7));
        assert!(!favs.is_favourite(8));
        assert_eq!(favs.ids(), before.as_slice());
    }

    #[test]
    fn page_resolves_against_catalog() {
        let catalog = sample_catalog();
        let favs = FavouritesStore::from_ids([25, 999, 1], 12);
        let view = favs.page(&catalog);
        let names: Vec<_> = view.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Pikachu", "Bulbasaur"]);
        assert_eq!(view.label(), "Page 1 of 1");
    }

    #[test]
    fn from_ids_deduplicates() {
        let favs = FavouritesStore::from_ids([4, 1, 4, 25, 1], 12);
        assert_eq!(favs.ids(), &[4, 1, 25]);
    }

    #[test]
    fn repository_roundtrip() {
        let repo = MemoryRepository::default();
        let mut favs = FavouritesStore::new(12);
        favs.add(6);
        favs.add(3);
        favs.save_to(&repo).unwrap();

        let restored = FavouritesStore::load_from(&repo, 12);
        assert_eq!(restored.ids(), &[6, 3]);
    }

    #[test]
    fn failing_repository_loads_empty() {
        let repo = MemoryRepository::failing();
        let favs = FavouritesStore::load_from(&repo, 12);
        assert!(favs.is_empty());
        assert!(favs.save_to(&repo).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn double_toggle_is_identity(
                initial in proptest::collection::vec(1u32..50, 0..30),
                id in 1u32..50,
            ) {
                let mut favs = FavouritesStore::from_ids(initial, 12);
                let before = favs.ids().to_vec();
                favs.toggle(id);
                favs.toggle(id);
                let mut after = favs.ids().to_vec();
                let mut expected = before;
                after.sort_unstable();
                expected.sort_unstable();
                prop_assert_eq!(after, expected);
            }

            #[test]
            fn add_twice_same_size(
                initial in proptest::collection::vec(1u32..50, 0..30),
                id in 1u32..50,
            ) {
                let mut favs = FavouritesStore::from_ids(initial, 12);
                favs.add(id);
                let size = favs.len();
                favs.add(id);
                prop_assert_eq!(favs.len(), size);
            }
        }
    }
}
