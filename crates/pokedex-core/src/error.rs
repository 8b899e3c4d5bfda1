use crate::entity::EntityId;

/// Failure to obtain or validate the entity catalog.
///
/// The `Display` text is shown verbatim by every view that depends on the
/// catalog, so it is written for people, not for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The data source itself failed (I/O, HTTP status, transport).
    Source(String),
    /// The data source answered but the payload could not be decoded.
    Parse(String),
    ZeroId,
    DuplicateId(EntityId),
    EmptyName(EntityId),
    DuplicateName(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(m) => write!(f, "{m}"),
            Self::Parse(m) => write!(f, "invalid catalog data: {m}"),
            Self::ZeroId => write!(f, "invalid catalog data: entity id 0 is not allowed"),
            Self::DuplicateId(id) => write!(f, "invalid catalog data: duplicate id {id}"),
            Self::EmptyName(id) => write!(f, "invalid catalog data: entity {id} has no name"),
            Self::DuplicateName(name) => {
                write!(f, "invalid catalog data: duplicate name \"{name}\"")
            },
        }
    }
}

impl std::error::Error for LoadError {}

/// Failure reading or writing the persisted favourites list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    Io(String),
    Format(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(m) => write!(f, "favourites storage unavailable: {m}"),
            Self::Format(m) => write!(f, "favourites storage corrupt: {m}"),
        }
    }
}

impl std::error::Error for PersistError {}
