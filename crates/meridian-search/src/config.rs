//! Configuration for Meridian Search.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Service directory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryConfig {
    /// Upper bound on the number of keys a search returns. Unbounded if unset.
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Whether the same description may be registered twice under one key.
    #[serde(default = "default_true")]
    pub allow_duplicate_services: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self { max_results: None, allow_duplicate_services: true }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Service directory configuration.
    #[serde(default)]
    pub directory: DirectoryConfig,
}

impl Config {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from TOML text. Missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
