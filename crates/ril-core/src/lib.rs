//! ril core - mirror the images of a subreddit into a local folder.
//!
//! A run pages through a subreddit listing until enough images of the wanted
//! orientation are collected, deletes files in the target folder that are no
//! longer part of that set, and downloads the missing images resized to a
//! fixed width.
//!
//! # Architecture
//!
//! ```text
//! Feed pages → Collect (filter, dedupe) → Reconcile folder → Download + Resize
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use ril_core::{Config, FilterConfig, Mirror, TracingObserver};
//!
//! #[tokio::main]
//! async fn main() -> ril_core::Result<()> {
//!     let config = Config::load()?;
//!     let mirror = Mirror::new(config, FilterConfig::default(), "earthporn", "~/Wallpapers")?;
//!
//!     let summary = mirror.run(&TracingObserver).await?;
//!     println!("Downloaded {} images", summary.downloaded);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod observer;
pub mod sync;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{Config, FilterConfig, Orientation, SortMode};
pub use error::{ConfigError, DownloadError, FeedError, FilenameError, Result, RilError};
pub use feed::{CollectOptions, FeedCollector, FeedFetcher, HttpClient, ReqwestClient};
pub use observer::{SyncEvent, SyncObserver, TracingObserver};
pub use sync::{filename_from_url, Downloader, Reconciler, Resizer};
pub use types::{ImageRecord, ImageSet, StopReason, SyncSummary};

use std::path::{Path, PathBuf};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One subreddit mirrored into one folder.
///
/// Holds everything a run needs; [`Mirror::run`] can be called repeatedly.
pub struct Mirror {
    config: Config,
    filter: FilterConfig,
    subreddit: String,
    folder: PathBuf,
    client: Box<dyn HttpClient>,
    resizer: Resizer,
}

impl Mirror {
    /// Create a mirror using the `reqwest` client built from `config`.
    pub fn new(
        config: Config,
        filter: FilterConfig,
        subreddit: impl Into<String>,
        target_folder: impl AsRef<Path>,
    ) -> Result<Self> {
        let subreddit = subreddit.into();
        validate_inputs(&config, &subreddit)?;
        let client = ReqwestClient::new(&config.feed, &config.download).map_err(FeedError::from)?;
        Ok(Self::from_parts(
            config,
            filter,
            subreddit,
            target_folder.as_ref(),
            Box::new(client),
        ))
    }

    /// Create a mirror with a caller-supplied HTTP client.
    pub fn with_client(
        config: Config,
        filter: FilterConfig,
        subreddit: impl Into<String>,
        target_folder: impl AsRef<Path>,
        client: Box<dyn HttpClient>,
    ) -> Result<Self> {
        let subreddit = subreddit.into();
        validate_inputs(&config, &subreddit)?;
        Ok(Self::from_parts(
            config,
            filter,
            subreddit,
            target_folder.as_ref(),
            client,
        ))
    }

    fn from_parts(
        config: Config,
        filter: FilterConfig,
        subreddit: String,
        target_folder: &Path,
        client: Box<dyn HttpClient>,
    ) -> Self {
        tracing::debug!("Initializing ril v{}", VERSION);
        let resizer = Resizer::new(config.download.target_width, config.download.max_height);
        Self {
            config,
            filter,
            subreddit,
            folder: crate::config::expand_path(target_folder),
            client,
            resizer,
        }
    }

    /// Target folder with `~` expanded.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Run one full sync: ensure the folder, collect, reconcile, download.
    ///
    /// Config and feed errors abort; per-image failures are counted in the
    /// summary.
    pub async fn run(&self, observer: &dyn SyncObserver) -> Result<SyncSummary> {
        tokio::fs::create_dir_all(&self.folder).await?;

        let fetcher = FeedFetcher::new(
            self.client.as_ref(),
            &self.config.feed.base_url,
            &self.subreddit,
            self.filter.sort(),
        );
        let collection = FeedCollector::new(
            fetcher,
            self.filter,
            CollectOptions::from(&self.config.feed),
        )
        .collect(observer)
        .await?;

        // Before downloading, so files about to be fetched are protected.
        let reconciled = Reconciler::new(&self.folder).reconcile(&collection.images, observer)?;

        let downloads = Downloader::new(self.client.as_ref(), self.resizer, &self.folder)
            .download_all(&collection.images, observer)
            .await;

        Ok(SyncSummary {
            pages_fetched: collection.pages,
            collected: collection.images.len(),
            removed: reconciled.removed,
            remove_failures: reconciled.failed,
            downloaded: downloads.downloaded,
            skipped: downloads.skipped,
            download_failures: downloads.failed,
        })
    }
}

fn validate_inputs(config: &Config, subreddit: &str) -> std::result::Result<(), ConfigError> {
    config.validate()?;
    if subreddit.trim_matches('/').trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "subreddit must not be empty".into(),
        ));
    }
    Ok(())
}
