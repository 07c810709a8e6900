//! Configuration management for ril.
//!
//! Static settings are loaded from `config.toml` in the platform config
//! directory with sensible defaults. Per-run selection settings live in
//! [`FilterConfig`] and are built from the command line.

mod filter;
mod types;
mod validate;

pub use filter::{FilterConfig, Orientation, SortMode};
pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for ril.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed endpoint and pagination settings
    pub feed: FeedConfig,

    /// Image download settings
    pub download: DownloadConfig,

    /// Watch-mode settings
    pub daemon: DaemonConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.ril.ril/config.toml
    /// - Linux: ~/.config/ril/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\ril\ril\config\config.toml
    ///
    /// Falls back to ~/.ril/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "ril", "ril")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".ril").join("config.toml")
            })
    }

    /// Get the resolved log file path (with ~ expansion), if one is configured.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging.file.as_deref().map(expand_path)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Expand a leading `~` in a path.
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}
