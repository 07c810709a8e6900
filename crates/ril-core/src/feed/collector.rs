//! The accumulation loop: page through the feed until enough images are
//! collected or the feed runs dry.

use std::collections::HashSet;
use std::time::Duration;

use crate::config::{FeedConfig, FilterConfig};
use crate::error::FeedError;
use crate::observer::{SyncEvent, SyncObserver};
use crate::types::{ImageSet, StopReason};

use super::fetcher::FeedFetcher;

/// Pacing and bounds for the accumulation loop.
#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    /// Pause between two page requests
    pub page_delay: Duration,
    /// Pages fetched at most
    pub max_pages: u32,
}

impl From<&FeedConfig> for CollectOptions {
    fn from(config: &FeedConfig) -> Self {
        Self {
            page_delay: Duration::from_millis(config.page_delay_ms),
            max_pages: config.max_pages,
        }
    }
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self::from(&FeedConfig::default())
    }
}

/// Result of one accumulation run.
#[derive(Debug, Clone)]
pub struct Collection {
    pub images: ImageSet,
    pub pages: u32,
    pub reason: StopReason,
}

/// Drives the fetcher page by page and filters posts into an [`ImageSet`].
pub struct FeedCollector<'a> {
    fetcher: FeedFetcher<'a>,
    filter: FilterConfig,
    options: CollectOptions,
}

impl<'a> FeedCollector<'a> {
    pub fn new(fetcher: FeedFetcher<'a>, filter: FilterConfig, options: CollectOptions) -> Self {
        Self {
            fetcher,
            filter,
            options,
        }
    }

    /// Collect up to `filter.limit()` images.
    ///
    /// The set never exceeds the limit. A page without a cursor, the page
    /// bound, or a cursor seen before ends the loop with a short result.
    /// Any feed error aborts.
    pub async fn collect(&self, observer: &dyn SyncObserver) -> Result<Collection, FeedError> {
        let limit = self.filter.limit();
        let mut images = ImageSet::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors = HashSet::new();
        let mut pages = 0u32;

        let reason = if limit == 0 {
            StopReason::LimitReached
        } else {
            loop {
                pages += 1;
                observer.on_event(&SyncEvent::PageRequested {
                    page: pages,
                    url: self.fetcher.page_url(cursor.as_deref()),
                });
                let page = self.fetcher.fetch(cursor.as_deref()).await?;

                let mut added = 0;
                for record in page.records() {
                    if images.len() >= limit {
                        break;
                    }
                    match record {
                        Ok(record) => {
                            if self.filter.accepts(record.width, record.height)
                                && images.insert(record.id, record.url)
                            {
                                added += 1;
                            }
                        }
                        Err(reason) => observer.on_event(&SyncEvent::EntrySkipped {
                            page: pages,
                            reason,
                        }),
                    }
                }
                observer.on_event(&SyncEvent::PageLoaded {
                    page: pages,
                    posts: page.posts.len(),
                    added,
                    total: images.len(),
                });

                if images.len() >= limit {
                    break StopReason::LimitReached;
                }
                let Some(next) = page.after else {
                    break StopReason::Exhausted;
                };
                if pages >= self.options.max_pages {
                    break StopReason::PageLimit;
                }
                if !seen_cursors.insert(next.clone()) {
                    break StopReason::RepeatedCursor;
                }

                tracing::debug!(
                    "Only loaded {}/{} images, continuing after {}",
                    images.len(),
                    limit,
                    next
                );
                cursor = Some(next);
                if !self.options.page_delay.is_zero() {
                    tokio::time::sleep(self.options.page_delay).await;
                }
            }
        };

        observer.on_event(&SyncEvent::CollectionFinished {
            collected: images.len(),
            limit,
            pages,
            reason,
        });

        Ok(Collection {
            images,
            pages,
            reason,
        })
    }
}
