use serde::{Deserialize, Serialize};

/// Unique identifier for an entity; also its canonical (Pokédex number) ordering key.
pub type EntityId = u32;

/// A single creature record in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub display: DisplayAttributes,
}

/// Presentation data carried alongside an entity. Never interpreted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAttributes {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

/// A named base stat (e.g. `hp`, `attack`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

impl Entity {
    pub fn new(id: EntityId, name: impl Into<String>, types: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            types: types.iter().map(|t| (*t).to_string()).collect(),
            display: DisplayAttributes::default(),
        }
    }

    /// Case-insensitive substring match against the name.
    ///
    /// `query_lower` must already be lowercased; callers lowercase once per
    /// query rather than once per entity.
    pub fn name_contains(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
    }

    /// Whether this entity carries the given type label.
    pub fn has_type(&self, label: &str) -> bool {
        self.types.iter().any(|t| t == label)
    }
}
