//! Folder reconciliation: remove files that are no longer in the image set.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::observer::{SyncEvent, SyncObserver};
use crate::types::ImageSet;

use super::filename::target_path;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Expected files already on disk
    pub kept: usize,
    /// Stray files deleted
    pub removed: usize,
    /// Stray files that could not be deleted
    pub failed: usize,
}

/// Deletes regular files in the target folder that the image set does not name.
pub struct Reconciler<'a> {
    folder: &'a Path,
}

impl<'a> Reconciler<'a> {
    pub fn new(folder: &'a Path) -> Self {
        Self { folder }
    }

    /// Paths the current image set maps to.
    ///
    /// URLs without a derivable filename are reported and contribute nothing.
    pub fn expected_paths(
        &self,
        images: &ImageSet,
        observer: &dyn SyncObserver,
    ) -> HashSet<PathBuf> {
        images
            .urls()
            .filter_map(|url| match target_path(self.folder, url) {
                Ok(path) => Some(path),
                Err(_) => {
                    observer.on_event(&SyncEvent::UnmappableUrl {
                        url: url.to_string(),
                    });
                    None
                }
            })
            .collect()
    }

    /// Regular files directly inside the folder, sorted by path.
    ///
    /// Fails only when the folder itself cannot be read; unreadable entries
    /// are skipped.
    pub fn list_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(self.folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Delete every regular file whose path is not expected.
    ///
    /// Deletion failures are reported and counted; they do not abort.
    pub fn reconcile(
        &self,
        images: &ImageSet,
        observer: &dyn SyncObserver,
    ) -> io::Result<ReconcileReport> {
        let expected = self.expected_paths(images, observer);
        let files = self.list_files()?;
        Ok(remove_strays(files, &expected, observer))
    }
}

/// Delete every listed file that is not expected, one at a time.
fn remove_strays(
    files: Vec<PathBuf>,
    expected: &HashSet<PathBuf>,
    observer: &dyn SyncObserver,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for path in files {
        if expected.contains(&path) {
            report.kept += 1;
            continue;
        }

        observer.on_event(&SyncEvent::StrayFound { path: path.clone() });
        match std::fs::remove_file(&path) {
            Ok(()) => {
                report.removed += 1;
                observer.on_event(&SyncEvent::StrayRemoved { path });
            }
            Err(e) => {
                report.failed += 1;
                observer.on_event(&SyncEvent::RemoveFailed {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
