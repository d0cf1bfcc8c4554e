//! Configuration module for deckmaster
//!
//! Settings are read from `<config_dir>/deckmaster/config.toml` and may be
//! overridden per key by `DECKMASTER_*` environment variables (for example
//! `DECKMASTER_LOG_LEVEL=debug`). A default file is written on first load.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DeckmasterConfig {
    /// Database directory; `None` means the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,

    /// Suppress informational output by default
    pub quiet: bool,

    /// Minimum horizontal travel for a swipe to navigate
    pub swipe_threshold: f32,

    /// Number of memoized search results
    pub search_cache_capacity: u64,
}

impl Default for DeckmasterConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: "info".to_string(),
            log_json: false,
            quiet: false,
            swipe_threshold: crate::viewer::DEFAULT_SWIPE_THRESHOLD,
            search_cache_capacity: crate::search::SearchCache::DEFAULT_CAPACITY,
        }
    }
}

impl DeckmasterConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("deckmaster").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path` plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("DECKMASTER").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))
    }

    /// Database directory to open
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the platform data
    /// directory cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("deckmaster"))
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))
    }
}
