//! Folder synchronization: filename derivation, reconciliation, downloading
//! and resizing.
//!
//! - **filename**: URL to stored filename
//! - **reconcile**: delete files the current set does not name
//! - **download**: fetch, resize and write each image
//! - **resize**: fixed-width Lanczos3 scaling

pub mod download;
pub mod filename;
pub mod reconcile;
pub mod resize;

pub use download::{DownloadOutcome, DownloadReport, Downloader};
pub use filename::{filename_from_url, target_path};
pub use reconcile::{ReconcileReport, Reconciler};
pub use resize::{target_height, Resized, Resizer};
