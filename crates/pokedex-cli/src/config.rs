use std::time::Duration;

use serde::Deserialize;

use pokedex_core::config::BrowseConfig;
use pokedex_guess::config::GuessConfig;

use crate::error::CliError;

/// Top-level configuration, loaded from `pokedex.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Local JSON file holding the catalog records.
    pub catalog_path: Option<String>,
    /// HTTP endpoint serving the catalog records. Takes priority over the file.
    pub catalog_url: Option<String>,
    /// Where favourites are kept between runs.
    pub favourites_path: String,
    /// How often timers are advanced while waiting for input (ms).
    pub tick_interval_ms: u64,
    pub browse: BrowseConfig,
    /// Game settings. Its search box follows `[browse]` unless a
    /// `[guess.search]` section is given.
    pub guess: GuessConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_path: Some("data/pokemon.json".to_string()),
            catalog_url: None,
            favourites_path: "favourites.json".to_string(),
            tick_interval_ms: 50,
            browse: BrowseConfig::default(),
            guess: GuessConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load from `$POKEDEX_CONFIG`, else `config/pokedex.toml`, else defaults.
    ///
    /// An explicitly named file that cannot be read is an error; a missing
    /// default file is not.
    pub fn load() -> Result<Self, CliError> {
        let config = if let Ok(path) = std::env::var("POKEDEX_CONFIG") {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| CliError::Config(format!("cannot read {path}: {e}")))?;
            Self::from_toml(&contents)?
        } else if let Ok(contents) = std::fs::read_to_string("config/pokedex.toml") {
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, CliError> {
        let table: toml::Table =
            toml::from_str(contents).map_err(|e| CliError::Config(e.to_string()))?;
        let own_game_search = table
            .get("guess")
            .and_then(|guess| guess.get("search"))
            .is_some();
        let mut config: Self = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| CliError::Config(e.to_string()))?;
        if !own_game_search {
            config.guess.search = config.browse.clone();
        }
        config.browse = config.browse.sanitized();
        config.guess.search = config.guess.search.sanitized();
        Ok(config)
    }

    /// Reject configurations the front end cannot run with.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.catalog_path.is_none() && self.catalog_url.is_none() {
            return Err(CliError::Config(
                "either catalog_path or catalog_url must be set".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(CliError::Config("tick_interval_ms must be > 0".to_string()));
        }
        if self.catalog_path.is_some() && self.catalog_url.is_some() {
            tracing::warn!("Both catalog_path and catalog_url set, using catalog_url");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
