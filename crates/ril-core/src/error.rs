//! Error types for the ril mirror.
//!
//! Errors are split by concern. Configuration and feed errors abort a run;
//! filename and download errors are scoped to a single image and are
//! reported without stopping the remaining work.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a mirror run.
#[derive(Error, Debug)]
pub enum RilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Feed protocol errors
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// General I/O errors (e.g. the target folder cannot be created)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Unknown sort mode
    #[error("Unknown sort mode '{0}' (expected one of: new, hot, top, random)")]
    InvalidSort(String),

    /// Unknown orientation
    #[error("Unknown orientation '{0}' (expected one of: landscape, portrait)")]
    InvalidOrientation(String),
}

/// Failures of the HTTP capability itself, before any status is inspected.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout or body read failure
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Body exceeded the configured size limit
    #[error("Response from {url} exceeds {max_bytes} bytes")]
    TooLarge { url: String, max_bytes: u64 },
}

/// Feed protocol errors. Any of these aborts the run.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The request never produced a response
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The feed answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The feed answered with an `error` payload
    #[error("Server returned error for {url}: {message}")]
    Api { url: String, message: String },

    /// The response body is not a listing
    #[error("Malformed feed response from {url}: {message}")]
    Malformed { url: String, message: String },
}

/// The URL does not end in a recognizable image filename.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    #[error("No .jpg/.png filename in URL: {url}")]
    NoMatch { url: String },
}

/// Per-image download failures.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The filename could not be derived from the URL
    #[error(transparent)]
    Filename(#[from] FilenameError),

    /// The request never produced a response
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The image host answered with a non-success status
    #[error("HTTP {status} downloading {url}")]
    Status { url: String, status: u16 },

    /// The bytes could not be decoded or re-encoded
    #[error("Decode error for {url}: {message}")]
    Decode { url: String, message: String },

    /// Writing the file failed
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for ril results.
pub type Result<T> = std::result::Result<T, RilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_wraps_into_ril_error() {
        let err: RilError = FeedError::Api {
            url: "https://www.reddit.com/r/x.json".to_string(),
            message: "404".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Feed error: Server returned error"));
    }

    #[test]
    fn test_download_error_from_filename_error() {
        let err: DownloadError = FilenameError::NoMatch {
            url: "https://i.redd.it/".to_string(),
        }
        .into();
        assert!(matches!(err, DownloadError::Filename(_)));
        assert!(err.to_string().contains("No .jpg/.png filename"));
    }
}
