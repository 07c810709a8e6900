//! Progress reporting for mirror runs.
//!
//! Every stage receives a [`SyncObserver`] and reports what it does through
//! [`SyncEvent`]s. The CLI uses [`TracingObserver`], which turns events into
//! `tracing` records; tests can plug in a recorder instead.

use std::path::PathBuf;

use crate::types::StopReason;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A feed page is about to be requested
    PageRequested { page: u32, url: String },
    /// A feed page was parsed
    PageLoaded {
        page: u32,
        posts: usize,
        added: usize,
        total: usize,
    },
    /// A post without usable preview data was ignored
    EntrySkipped { page: u32, reason: String },
    /// The accumulation loop finished
    CollectionFinished {
        collected: usize,
        limit: usize,
        pages: u32,
        reason: StopReason,
    },
    /// A URL yields no filename and cannot protect or produce a file
    UnmappableUrl { url: String },
    /// A file in the target folder is not part of the current set
    StrayFound { path: PathBuf },
    /// A stray file was deleted
    StrayRemoved { path: PathBuf },
    /// A stray file could not be deleted
    RemoveFailed { path: PathBuf, error: String },
    /// The image is already on disk
    AlreadyPresent { path: PathBuf },
    /// An image download is starting
    Downloading { url: String },
    /// An image was resized and written
    Downloaded {
        path: PathBuf,
        from: (u32, u32),
        to: (u32, u32),
    },
    /// An image could not be downloaded, resized or written
    DownloadFailed { url: String, error: String },
}

/// Receives progress events from the mirror stages.
pub trait SyncObserver: Send + Sync {
    fn on_event(&self, event: &SyncEvent);
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SyncObserver for TracingObserver {
    fn on_event(&self, event: &SyncEvent) {
        match event {
            SyncEvent::PageRequested { page, url } => {
                tracing::info!("Loading images from {} (page {})", url, page);
            }
            SyncEvent::PageLoaded {
                page,
                posts,
                added,
                total,
            } => {
                tracing::debug!(
                    "Page {}: {} posts, {} new images, {} collected",
                    page,
                    posts,
                    added,
                    total
                );
            }
            SyncEvent::EntrySkipped { page, reason } => {
                tracing::debug!("Skipping post on page {}: {}", page, reason);
            }
            SyncEvent::CollectionFinished {
                collected,
                limit,
                pages,
                reason,
            } => match reason {
                StopReason::LimitReached | StopReason::Exhausted => tracing::info!(
                    "Collected {}/{} images from {} page(s) ({:?})",
                    collected,
                    limit,
                    pages,
                    reason
                ),
                StopReason::PageLimit | StopReason::RepeatedCursor => tracing::warn!(
                    "Stopped after {} page(s) with {}/{} images ({:?})",
                    pages,
                    collected,
                    limit,
                    reason
                ),
            },
            SyncEvent::UnmappableUrl { url } => {
                tracing::warn!("No image filename in {}", url);
            }
            SyncEvent::StrayFound { path } => {
                tracing::info!(
                    "File found, which is not part of our list of images: {}",
                    path.display()
                );
            }
            SyncEvent::StrayRemoved { path } => {
                tracing::info!("Removed {}", path.display());
            }
            SyncEvent::RemoveFailed { path, error } => {
                tracing::error!("Unable to remove file {}: {}", path.display(), error);
            }
            SyncEvent::AlreadyPresent { path } => {
                tracing::info!("File {} already downloaded, skipping download", path.display());
            }
            SyncEvent::Downloading { url } => {
                tracing::info!("Downloading {}", url);
            }
            SyncEvent::Downloaded { path, from, to } => {
                tracing::debug!(
                    "Resized {}x{} -> {}x{}: {}",
                    from.0,
                    from.1,
                    to.0,
                    to.1,
                    path.display()
                );
            }
            SyncEvent::DownloadFailed { url, error } => {
                tracing::error!("Failed to download {}: {}", url, error);
            }
        }
    }
}
