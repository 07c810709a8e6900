//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Feed endpoint and pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the feed host
    pub base_url: String,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Pause between two page requests in milliseconds
    pub page_delay_ms: u64,

    /// Upper bound on pages fetched in one run
    pub max_pages: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
            user_agent: "Reddit Image Loader 1.0".to_string(),
            page_delay_ms: 1000,
            max_pages: 50,
            timeout_secs: 30,
        }
    }
}

/// Image download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Width every stored image is resized to
    pub target_width: u32,

    /// Tallest stored image; sources scaling beyond it are rejected
    pub max_height: u32,

    /// Largest accepted response body in bytes
    pub max_bytes: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            target_width: 1920,
            max_height: 16384,
            max_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Watch-mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Seconds between two sync cycles
    pub interval_secs: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,

    /// Optional file that receives a copy of every log line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}
