//! Feed access: the HTTP capability, page fetching, metadata extraction and
//! the accumulation loop.
//!
//! - **client**: `HttpClient` trait and the `reqwest` implementation
//! - **fetcher**: one listing page per call
//! - **page**: listing parsing and per-post image extraction
//! - **collector**: pages through the feed until the limit or the end

pub mod client;
pub mod collector;
pub mod fetcher;
pub mod page;

pub use client::{HttpClient, HttpResponse, ReqwestClient};
pub use collector::{CollectOptions, Collection, FeedCollector};
pub use fetcher::FeedFetcher;
pub use page::FeedPage;
