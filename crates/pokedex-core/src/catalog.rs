use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::entity::{Entity, EntityId};
use crate::error::LoadError;

/// The full, immutable list of entities for a session.
///
/// Entities are kept in ascending id order and indexed by id at construction.
/// Views hand out `Arc<Entity>` clones so selections never borrow the catalog.
#[derive(Debug)]
pub struct Catalog {
    entities: Vec<Arc<Entity>>,
    index: HashMap<EntityId, usize>,
}

impl Catalog {
    /// Validate and index a batch of records.
    pub fn new(mut records: Vec<Entity>) -> Result<Self, LoadError> {
        records.sort_by_key(|e| e.id);

        let mut index = HashMap::with_capacity(records.len());
        let mut names = HashSet::with_capacity(records.len());
        for (i, entity) in records.iter().enumerate() {
            if entity.id == 0 {
                return Err(LoadError::ZeroId);
            }
            if entity.name.trim().is_empty() {
                return Err(LoadError::EmptyName(entity.id));
            }
            if index.insert(entity.id, i).is_some() {
                return Err(LoadError::DuplicateId(entity.id));
            }
            if !names.insert(entity.name.to_lowercase()) {
                return Err(LoadError::DuplicateName(entity.name.clone()));
            }
        }

        Ok(Self {
            entities: records.into_iter().map(Arc::new).collect(),
            index,
        })
    }

    /// Decode a JSON array of entity records and build a catalog from it.
    pub fn from_json(data: &str) -> Result<Self, LoadError> {
        let records: Vec<Entity> =
            serde_json::from_str(data).map_err(|e| LoadError::Parse(e.to_string()))?;
        Self::new(records)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Arc<Entity>> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    /// Entity at a position in canonical order.
    pub fn at(&self, position: usize) -> Option<&Arc<Entity>> {
        self.entities.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Entity>> {
        self.entities.iter()
    }

    /// Entities whose name contains `query` (case-insensitive), in catalog order.
    pub fn search(&self, query: &str) -> Vec<Arc<Entity>> {
        let needle = query.to_lowercase();
        self.entities
            .iter()
            .filter(|e| e.name_contains(&needle))
            .map(Arc::clone)
            .collect()
    }

    /// Every type label used in the catalog, sorted and de-duplicated.
    pub fn all_types(&self) -> Vec<String> {
        self.entities
            .iter()
            .flat_map(|e| e.types.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Availability of the catalog as seen by every dependent view.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Arc<Catalog>),
    Failed(String),
}

impl LoadState {
    /// Deliver the data source's single result.
    ///
    /// Only the first delivery is applied; returns `false` for later ones.
    pub fn complete(&mut self, result: Result<Catalog, LoadError>) -> bool {
        if !matches!(self, Self::Loading) {
            tracing::warn!("Catalog load delivered more than once, ignoring");
            return false;
        }
        *self = match result {
            Ok(catalog) => {
                tracing::info!(entities = catalog.len(), "Catalog ready");
                Self::Ready(Arc::new(catalog))
            },
            Err(e) => {
                tracing::warn!(error = %e, "Catalog load failed");
                Self::Failed(e.to_string())
            },
        };
        true
    }

    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        match self {
            Self::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// Banner text for views that cannot render without the catalog.
    pub fn banner(&self) -> Option<String> {
        match self {
            Self::Loading => Some("Loading...".to_string()),
            Self::Ready(_) => None,
            Self::Failed(message) => Some(format!("Error: {message}")),
        }
    }
}
