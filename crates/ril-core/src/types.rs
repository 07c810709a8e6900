//! Core data types shared by the feed and sync stages.

use std::collections::HashMap;

/// One image post extracted from a feed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Feed-unique image id
    pub id: String,
    /// Source URL, HTML entities already unescaped
    pub url: String,
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
}

/// Insertion-ordered `id → url` mapping accumulated over a run.
///
/// Holds at most one URL per id. Entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an image. Returns `false` when the id was already present,
    /// in which case the stored URL is replaced.
    pub fn insert(&mut self, id: impl Into<String>, url: impl Into<String>) -> bool {
        let id = id.into();
        let url = url.into();
        match self.index.get(&id) {
            Some(&pos) => {
                self.entries[pos].1 = url;
                false
            }
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, url));
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&pos| self.entries[pos].1.as_str())
    }

    /// Iterate `(id, url)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, url)| (id.as_str(), url.as_str()))
    }

    /// Iterate URLs in insertion order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, url)| url.as_str())
    }
}

/// Why the accumulation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The requested number of images was collected
    LimitReached,
    /// The feed returned no further cursor
    Exhausted,
    /// The page bound was hit
    PageLimit,
    /// The feed handed back a cursor it had already returned
    RepeatedCursor,
}

/// Counts produced by one mirror run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Feed pages requested
    pub pages_fetched: u32,
    /// Images selected from the feed
    pub collected: usize,
    /// Stray files deleted
    pub removed: usize,
    /// Stray files that could not be deleted
    pub remove_failures: usize,
    /// Images fetched and written
    pub downloaded: usize,
    /// Images already on disk
    pub skipped: usize,
    /// Images that failed to download, resize or write
    pub download_failures: usize,
}
