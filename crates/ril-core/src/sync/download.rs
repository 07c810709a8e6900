//! Downloading, resizing and storing the images of a set.

use image::ImageFormat;
use std::path::{Path, PathBuf};

use crate::error::DownloadError;
use crate::feed::HttpClient;
use crate::observer::{SyncEvent, SyncObserver};
use crate::types::ImageSet;

use super::filename::target_path;
use super::resize::Resizer;

/// Counts for one download pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    /// Already on disk
    pub skipped: usize,
    pub failed: usize,
}

/// What happened to a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded(PathBuf),
    AlreadyPresent(PathBuf),
}

/// Fetches each image of a set, resizes it and writes it into the folder.
pub struct Downloader<'a> {
    client: &'a dyn HttpClient,
    resizer: Resizer,
    folder: &'a Path,
}

impl<'a> Downloader<'a> {
    pub fn new(client: &'a dyn HttpClient, resizer: Resizer, folder: &'a Path) -> Self {
        Self {
            client,
            resizer,
            folder,
        }
    }

    /// Process every image in insertion order, one at a time.
    ///
    /// A failing image is reported and counted; the rest still run.
    pub async fn download_all(
        &self,
        images: &ImageSet,
        observer: &dyn SyncObserver,
    ) -> DownloadReport {
        let mut report = DownloadReport::default();

        for url in images.urls() {
            match self.download(url, observer).await {
                Ok(DownloadOutcome::Downloaded(_)) => report.downloaded += 1,
                Ok(DownloadOutcome::AlreadyPresent(path)) => {
                    report.skipped += 1;
                    observer.on_event(&SyncEvent::AlreadyPresent { path });
                }
                Err(e) => {
                    report.failed += 1;
                    observer.on_event(&SyncEvent::DownloadFailed {
                        url: url.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Download a single image unless its file already exists.
    pub async fn download(
        &self,
        url: &str,
        observer: &dyn SyncObserver,
    ) -> Result<DownloadOutcome, DownloadError> {
        let path = target_path(self.folder, url)?;
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(DownloadOutcome::AlreadyPresent(path));
        }

        observer.on_event(&SyncEvent::Downloading {
            url: url.to_string(),
        });
        let response = self.client.get(url).await?;
        if !response.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        // The filename only ever ends in .jpg or .png.
        let fallback = ImageFormat::from_path(&path).unwrap_or(ImageFormat::Jpeg);
        let resizer = self.resizer;
        let body = response.body;
        let resized = tokio::task::spawn_blocking(move || resizer.resize(body, fallback))
            .await
            .map_err(|e| DownloadError::Decode {
                url: url.to_string(),
                message: format!("resize task failed: {e}"),
            })?
            .map_err(|message| DownloadError::Decode {
                url: url.to_string(),
                message,
            })?;

        write_atomic(&path, &resized.bytes).await?;

        observer.on_event(&SyncEvent::Downloaded {
            path: path.clone(),
            from: resized.from,
            to: resized.to,
        });
        Ok(DownloadOutcome::Downloaded(path))
    }
}

/// Write to `<path>.part`, then rename onto `path`.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    let io_error = |source| DownloadError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = tokio::fs::write(&part, bytes).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(io_error(e));
    }
    if let Err(e) = tokio::fs::rename(&part, path).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(io_error(e));
    }
    Ok(())
}
