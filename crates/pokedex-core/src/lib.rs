pub mod catalog;
pub mod compare;
pub mod config;
pub mod entity;
pub mod error;
pub mod favourites;
pub mod filter;
pub mod pagination;
pub mod search;
pub mod timer;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::cell::RefCell;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::catalog::Catalog;
    use crate::entity::{Entity, EntityId};
    use crate::error::PersistError;
    use crate::favourites::FavouritesRepository;

    /// Shorthand for a millisecond duration.
    pub fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    /// The first-generation starters plus Pikachu and Raichu.
    pub fn sample_entities() -> Vec<Entity> {
        vec![
            Entity::new(1, "Bulbasaur", &["grass", "poison"]),
            Entity::new(2, "Ivysaur", &["grass", "poison"]),
            Entity::new(3, "Venusaur", &["grass", "poison"]),
            Entity::new(4, "Charmander", &["fire"]),
            Entity::new(5, "Charmeleon", &["fire"]),
            Entity::new(6, "Charizard", &["fire", "flying"]),
            Entity::new(7, "Squirtle", &["water"]),
            Entity::new(8, "Wartortle", &["water"]),
            Entity::new(9, "Blastoise", &["water"]),
            Entity::new(25, "Pikachu", &["electric"]),
            Entity::new(26, "Raichu", &["electric"]),
        ]
    }

    pub fn sample_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(sample_entities()).expect("sample catalog must be valid"))
    }

    /// The three-entry catalog used by the guessing-game walkthrough.
    pub fn starter_trio() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                Entity::new(1, "Bulbasaur", &["grass", "poison"]),
                Entity::new(4, "Charmander", &["fire"]),
                Entity::new(25, "Pikachu", &["electric"]),
            ])
            .expect("starter catalog must be valid"),
        )
    }

    /// `n` entities named `Mon1..MonN`, typed `even`/`odd`, every tenth also `tenth`.
    pub fn numbered_catalog(n: EntityId) -> Arc<Catalog> {
        let entities = (1..=n)
            .map(|i| {
                let parity = if i % 2 == 0 { "even" } else { "odd" };
                let mut types = vec![parity];
                if i % 10 == 0 {
                    types.push("tenth");
                }
                Entity::new(i, format!("Mon{i}"), &types)
            })
            .collect();
        Arc::new(Catalog::new(entities).expect("numbered catalog must be valid"))
    }

    /// In-memory favourites repository.
    #[derive(Default)]
    pub struct MemoryRepository {
        saved: RefCell<Vec<EntityId>>,
        fail: bool,
    }

    impl MemoryRepository {
        /// A repository whose every operation fails.
        pub fn failing() -> Self {
            Self {
                saved: RefCell::new(Vec::new()),
                fail: true,
            }
        }

        pub fn saved(&self) -> Vec<EntityId> {
            self.saved.borrow().clone()
        }
    }

    impl FavouritesRepository for MemoryRepository {
        fn load(&self) -> Result<Vec<EntityId>, PersistError> {
            if self.fail {
                return Err(PersistError::Io("unavailable".to_string()));
            }
            Ok(self.saved())
        }

        fn save(&self, ids: &[EntityId]) -> Result<(), PersistError> {
            if self.fail {
                return Err(PersistError::Io("unavailable".to_string()));
            }
            *self.saved.borrow_mut() = ids.to_vec();
            Ok(())
        }
    }
}
