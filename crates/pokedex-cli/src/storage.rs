use std::path::PathBuf;

use pokedex_core::entity::EntityId;
use pokedex_core::error::PersistError;
use pokedex_core::favourites::FavouritesRepository;

/// Favourites kept as a JSON array of ids in a single file.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FavouritesRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<EntityId>, PersistError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistError::Io(e.to_string())),
        };
        serde_json::from_str(&contents).map_err(|e| PersistError::Format(e.to_string()))
    }

    fn save(&self, ids: &[EntityId]) -> Result<(), PersistError> {
        let data = serde_json::to_string(ids).map_err(|e| PersistError::Format(e.to_string()))?;
        std::fs::write(&self.path, data).map_err(|e| PersistError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("pokedex-favs-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn missing_file_is_empty() {
        let repo = JsonFileRepository::new(temp_path());
        assert_eq!(repo.load().unwrap(), Vec::<EntityId>::new());
    }

    #[test]
    fn save_then_load() {
        let path = temp_path();
        let repo = JsonFileRepository::new(&path);
        repo.save(&[25, 1, 4]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[25,1,4]");
        assert_eq!(repo.load().unwrap(), vec![25, 1, 4]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn corrupt_file_is_format_error() {
        let path = temp_path();
        std::fs::write(&path, "{not a list").unwrap();
        let repo = JsonFileRepository::new(&path);
        assert!(matches!(repo.load(), Err(PersistError::Format(_))));
        std::fs::remove_file(path).ok();
    }
}
