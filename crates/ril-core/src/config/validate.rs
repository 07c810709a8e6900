//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "feed.base_url must not be empty".into(),
            ));
        }
        if self.feed.max_pages == 0 {
            return Err(ConfigError::ValidationError(
                "feed.max_pages must be > 0".into(),
            ));
        }
        if self.feed.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "feed.timeout_secs must be > 0".into(),
            ));
        }
        if self.download.target_width == 0 {
            return Err(ConfigError::ValidationError(
                "download.target_width must be > 0".into(),
            ));
        }
        if self.download.max_height == 0 {
            return Err(ConfigError::ValidationError(
                "download.max_height must be > 0".into(),
            ));
        }
        if self.download.max_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "download.max_bytes must be > 0".into(),
            ));
        }
        if self.daemon.interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "daemon.interval_secs must be > 0".into(),
            ));
        }
        if !matches!(
            self.logging.level.as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of error, warn, info, debug, trace, got \"{}\"",
                self.logging.level
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        Ok(())
    }
}
