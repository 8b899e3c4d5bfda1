use std::path::PathBuf;

use pokedex_core::catalog::Catalog;
use pokedex_core::error::LoadError;

use crate::config::CliConfig;
use crate::error::CliError;

/// Where the catalog comes from. Fetched once per run, never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Http(String),
}

impl CatalogSource {
    pub fn from_config(config: &CliConfig) -> Result<Self, CliError> {
        if let Some(url) = &config.catalog_url {
            return Ok(Self::Http(url.clone()));
        }
        if let Some(path) = &config.catalog_path {
            return Ok(Self::File(PathBuf::from(path)));
        }
        Err(CliError::Config("no catalog source configured".to_string()))
    }

    pub async fn fetch(&self) -> Result<Catalog, LoadError> {
        let body = match self {
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::Source(format!("cannot read {}: {e}", path.display())))?,
            Self::Http(url) => fetch_text(url).await?,
        };
        Catalog::from_json(&body)
    }
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    tracing::debug!(url, "Fetching catalog");
    let response = reqwest::get(url)
        .await
        .map_err(|e| LoadError::Source(format!("Failed to fetch catalog: {e}")))?
        .error_for_status()
        .map_err(|e| LoadError::Source(format!("Failed to fetch catalog: {e}")))?;
    response
        .text()
        .await
        .map_err(|e| LoadError::Source(format!("Failed to read catalog: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pokedex-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn url_wins_over_path() {
        let config = CliConfig {
            catalog_url: Some("http://example.invalid/pokemon.json".to_string()),
            ..CliConfig::default()
        };
        assert_eq!(
            CatalogSource::from_config(&config).unwrap(),
            CatalogSource::Http("http://example.invalid/pokemon.json".to_string())
        );
    }

    #[tokio::test]
    async fn file_source_loads_catalog() {
        let path = temp_file(
            r#"[
                {"id": 25, "name": "Pikachu", "types": ["electric"]},
                {"id": 1, "name": "Bulbasaur", "types": ["grass", "poison"],
                 "display": {"image": "1.png", "stats": [{"name": "hp", "value": 45}]}}
            ]"#,
        );
        let catalog = CatalogSource::File(path.clone()).fetch().await.unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.at(0).unwrap().name, "Bulbasaur");
        assert_eq!(catalog.get(1).unwrap().display.stats[0].value, 45);
    }

    #[tokio::test]
    async fn missing_file_is_source_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        let err = CatalogSource::File(path).fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Source(_)));
    }

    #[tokio::test]
    async fn invalid_records_are_reported() {
        let path = temp_file(r#"[{"id": 4, "name": "A"}, {"id": 4, "name": "B"}]"#);
        let err = CatalogSource::File(path.clone()).fetch().await.unwrap_err();
        std::fs::remove_file(path).ok();
        assert_eq!(err, LoadError::DuplicateId(4));
    }
}
