//! User configuration (`config.toml`)
//!
//! ```toml
//! [deck]
//! data_dir = "/home/me/symbols"
//! deck_file = "database.csv"
//! progress_file = "flashcards_symbols.csv"
//! default_tag = "simbolos"
//!
//! [session]
//! clear_hard_on_hard_only = false
//! ```
//! Every key is optional. Relative file names are resolved against `data_dir`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::storage::DEFAULT_TAG;
use crate::flashcards::FlashcardStorage;
use crate::review::SessionOptions;

const APP_DIR: &str = "symdrill";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_DECK_FILE: &str = "database.csv";
const DEFAULT_PROGRESS_FILE: &str = "flashcards_symbols.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub data_dir: Option<PathBuf>,
    pub deck_file: PathBuf,
    pub progress_file: PathBuf,
    pub default_tag: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            deck_file: PathBuf::from(DEFAULT_DECK_FILE),
            progress_file: PathBuf::from(DEFAULT_PROGRESS_FILE),
            default_tag: DEFAULT_TAG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub clear_hard_on_hard_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub deck: DeckConfig,
    pub session: SessionConfig,
}

impl Config {
    /// `~/.config/symdrill/config.toml` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join(APP_DIR))
            .ok_or(ConfigError::DataDirNotFound)
    }

    /// Load the config at `path`, or at the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Toml {
            path: path.clone(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.deck.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    pub fn deck_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.deck.deck_file))
    }

    pub fn progress_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.deck.progress_file))
    }

    pub fn storage(&self) -> Result<FlashcardStorage> {
        Ok(
            FlashcardStorage::new(self.deck_path()?, self.progress_path()?)
                .with_default_tag(self.deck.default_tag.clone()),
        )
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            clear_hard_on_hard_only: self.session.clear_hard_on_hard_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.deck.deck_file, PathBuf::from("database.csv"));
        assert_eq!(config.deck.default_tag, "simbolos");
        assert!(!config.session.clear_hard_on_hard_only);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [deck]
            data_dir = "/srv/symbols"
            progress_file = "progress.csv"

            [session]
            clear_hard_on_hard_only = true
            "#,
        )
        .unwrap();

        assert_eq!(config.deck_path().unwrap(), PathBuf::from("/srv/symbols/database.csv"));
        assert_eq!(config.progress_path().unwrap(), PathBuf::from("/srv/symbols/progress.csv"));
        assert!(config.session_options().clear_hard_on_hard_only);
    }

    #[test]
    fn test_absolute_file_overrides_data_dir() {
        let mut config = Config::default();
        config.deck.data_dir = Some(PathBuf::from("/srv/symbols"));
        config.deck.deck_file = PathBuf::from("/elsewhere/deck.csv");
        assert_eq!(config.deck_path().unwrap(), PathBuf::from("/elsewhere/deck.csv"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(&temp.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[deck]\ndeck_file = 3\n").unwrap();

        match Config::load(Some(&path)) {
            Err(ConfigError::Toml { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected toml error, got {:?}", other),
        }
    }
}
