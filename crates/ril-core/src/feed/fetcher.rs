//! Single-page feed requests.

use crate::config::SortMode;
use crate::error::FeedError;

use super::client::HttpClient;
use super::page::FeedPage;

/// Fetches pages of one subreddit listing.
pub struct FeedFetcher<'a> {
    client: &'a dyn HttpClient,
    endpoint: String,
}

impl<'a> FeedFetcher<'a> {
    pub fn new(
        client: &'a dyn HttpClient,
        base_url: &str,
        subreddit: &str,
        sort: Option<SortMode>,
    ) -> Self {
        Self {
            client,
            endpoint: listing_endpoint(base_url, subreddit, sort),
        }
    }

    /// The listing URL without a cursor.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// URL of the page that starts after `cursor`.
    pub fn page_url(&self, cursor: Option<&str>) -> String {
        match cursor {
            Some(after) => format!("{}?after={}", self.endpoint, after),
            None => self.endpoint.clone(),
        }
    }

    /// Request and parse one page.
    pub async fn fetch(&self, cursor: Option<&str>) -> Result<FeedPage, FeedError> {
        let url = self.page_url(cursor);
        let response = self.client.get(&url).await?;

        // Error payloads come with 4xx statuses; surface the payload when there is one.
        if !response.is_success() {
            return match FeedPage::parse(&url, &response.body) {
                Err(api @ FeedError::Api { .. }) => Err(api),
                _ => Err(FeedError::Status {
                    url,
                    status: response.status,
                }),
            };
        }

        FeedPage::parse(&url, &response.body)
    }
}

/// `<base>/r/<subreddit>[/<sort>].json`
pub fn listing_endpoint(base_url: &str, subreddit: &str, sort: Option<SortMode>) -> String {
    let base = base_url.trim_end_matches('/');
    let name = subreddit.trim_matches('/');
    let name = name.strip_prefix("r/").unwrap_or(name);
    match sort {
        Some(mode) => format!("{base}/r/{name}/{mode}.json"),
        None => format!("{base}/r/{name}.json"),
    }
}
