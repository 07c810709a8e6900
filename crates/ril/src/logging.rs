//! Logging initialization and configuration.
//!
//! Uses the `tracing` ecosystem for structured logging with support for
//! both human-readable and JSON output formats, plus an optional copy of
//! every line in a log file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is unset
    pub level: &'static str,
    /// JSON lines on stderr instead of pretty output
    pub json: bool,
    /// File that receives a plain-text copy of the log
    pub file: Option<PathBuf>,
}

impl LogSettings {
    /// Combine config file settings with CLI flags and the `DEBUG` variable.
    ///
    /// CLI flags win over the config file; `--logfile` replaces `logging.file`.
    pub fn resolve(
        config: &ril_core::Config,
        verbose: bool,
        json_logs: bool,
        logfile: Option<&Path>,
        debug_env: bool,
    ) -> Self {
        let level = if config.logging.level == "trace" {
            "trace"
        } else if verbose || debug_env || config.logging.level == "debug" {
            "debug"
        } else {
            match config.logging.level.as_str() {
                "error" => "error",
                "warn" => "warn",
                _ => "info",
            }
        };
        Self {
            level,
            json: json_logs || config.logging.format == "json",
            file: logfile
                .map(ril_core::config::expand_path)
                .or_else(|| config.log_file()),
        }
    }
}

/// Initialize the logging subsystem.
///
/// # Notes
///
/// - Log output goes to stderr
/// - The RUST_LOG environment variable overrides the level
/// - The log file is opened in append mode and created if missing
pub fn init(settings: &LogSettings) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.level));

    let file_layer = match &settings.file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    // JSON format for machine parsing, pretty format for humans
    let json_layer = settings
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let pretty_layer = (!settings.json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_ansi(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}
