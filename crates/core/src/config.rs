//! Application configuration.
//!
//! Loaded once at startup and passed down explicitly; nothing re-reads it
//! behind the caller's back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{APP_DIR_NAME, DEFAULT_HOST, DEFAULT_POOL_SIZE, DEFAULT_PORT};
use crate::env_config::parse_with_default;
use crate::{Result, VocabError};

pub const ENV_DATABASE: &str = "WORTSCHATZ_DB";
pub const ENV_TRANSLATIONS: &str = "WORTSCHATZ_TRANSLATIONS";
pub const ENV_DUMP_DIR: &str = "WORTSCHATZ_DUMP_DIR";
pub const ENV_HOST: &str = "WORTSCHATZ_HOST";
pub const ENV_PORT: &str = "WORTSCHATZ_PORT";
pub const ENV_POOL_SIZE: &str = "WORTSCHATZ_DB_POOL_SIZE";
pub const ENV_CONFIG: &str = "WORTSCHATZ_CONFIG";

/// Root configuration, deserialized from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// File locations used by storage and the translation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// `SQLite` database holding one table per topic.
    pub database: PathBuf,
    /// TOML document mapping topic names to display labels.
    pub translations: PathBuf,
    /// Directory receiving `<topic>.csv` dumps.
    pub dump: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub pool_size: u32,
    /// Write the topic's CSV dump after every add/edit.
    pub dump_on_write: bool,
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

impl Default for PathsConfig {
    fn default() -> Self {
        let base = data_dir();
        Self {
            database: base.join("german.db"),
            translations: base.join("translations.toml"),
            dump: base.join("dump"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_HOST.to_owned(), port: DEFAULT_PORT }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { pool_size: DEFAULT_POOL_SIZE, dump_on_write: true }
    }
}

/// Default location of the config file: `<config dir>/wortschatz/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

impl AppConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    /// Returns [`VocabError::Config`] if the document is not valid TOML for
    /// this schema.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| VocabError::Config(e.to_string()))
    }

    /// Read a config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| VocabError::Config(format!("{}: {e}", path.display())))
    }

    /// Load the configuration, searching in order:
    ///
    /// 1. `config_override`, the path passed via `--config`
    /// 2. [`default_config_path`], if it exists
    /// 3. Built-in [`AppConfig::default`]
    ///
    /// `WORTSCHATZ_*` environment variables are applied on top.
    ///
    /// # Errors
    /// Returns an error if an explicitly given or existing file is unreadable
    /// or malformed.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = config_override {
            Self::from_file(path)?
        } else {
            match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    tracing::debug!("no config file found, using defaults");
                    Self::default()
                },
            }
        };
        config.apply_overrides(|var| std::env::var(var).ok());
        Ok(config)
    }

    /// Apply `WORTSCHATZ_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty(ENV_DATABASE) {
            self.paths.database = PathBuf::from(path);
        }
        if let Some(path) = non_empty(ENV_TRANSLATIONS) {
            self.paths.translations = PathBuf::from(path);
        }
        if let Some(path) = non_empty(ENV_DUMP_DIR) {
            self.paths.dump = PathBuf::from(path);
        }
        if let Some(host) = non_empty(ENV_HOST) {
            self.server.host = host;
        }
        self.server.port =
            parse_with_default(ENV_PORT, lookup(ENV_PORT).as_deref(), self.server.port);
        self.storage.pool_size = parse_with_default(
            ENV_POOL_SIZE,
            lookup(ENV_POOL_SIZE).as_deref(),
            self.storage.pool_size,
        )
        .max(1);
    }
}
