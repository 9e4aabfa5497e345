//! Configuration file management.
//!
//! Handles reading, writing, and validating `.portunus.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::cipher;
use crate::core::constants;
use crate::core::domain::Principal;
use crate::error::{ConfigError, Result};

/// Configuration stored in `.portunus.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Metadata about the configuration
    pub portunus: Meta,
    /// Where the filesystem stores keep their data
    #[serde(default)]
    pub store: StoreConfig,
    /// Identity the CLI reads as
    #[serde(default)]
    pub principal: Principal,
}

/// Metadata section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Configuration version
    pub version: String,
}

/// Store section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Data directory, relative paths resolve against the working directory
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

fn default_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_DATA_DIR)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

impl Config {
    /// Create a default configuration with current version
    pub fn new() -> Self {
        Self {
            portunus: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            store: StoreConfig::default(),
            principal: Principal::default(),
        }
    }

    /// Path to the configuration file in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration for a command.
    ///
    /// An explicit path must exist. Without one, `.portunus.toml` in the
    /// current directory is read if present, otherwise defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if an explicit path is missing,
    /// `ConfigError::Parse` if the TOML is malformed, or a validation error.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load(&path)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::new())
                }
            }
        }
    }

    /// Load and validate configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            dir = %config.store.dir.display(),
            teams = config.principal.teams.len(),
            "config loaded"
        );

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "config",
            reason: e.to_string(),
        })?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate the configuration structure and contents
    ///
    /// Checks:
    /// - Version field looks like semver
    /// - Data directory is not empty
    /// - Principal public key, if set, is an age recipient or armored OpenPGP key
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::MissingField` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.portunus.version.is_empty() {
            return Err(ConfigError::MissingField { field: "version" }.into());
        }

        let version_parts: Vec<&str> = self.portunus.version.split('.').collect();
        if version_parts.len() < 2 {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: format!("not a valid semver: {}", self.portunus.version),
            }
            .into());
        }

        if self.store.dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "store.dir" }.into());
        }

        if let Some(key) = self.principal.public_key() {
            if let Err(e) = cipher::validate_public_key(key) {
                return Err(ConfigError::InvalidValue {
                    field: "principal.public_key",
                    reason: e.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
