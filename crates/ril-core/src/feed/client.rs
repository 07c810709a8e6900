//! HTTP capability used for both feed pages and image bytes.

use async_trait::async_trait;
use futures_util::StreamExt;
use std::time::Duration;

use crate::config::{DownloadConfig, FeedConfig};
use crate::error::TransportError;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a GET and returns whatever the server answered.
///
/// Non-success statuses are not errors at this layer; callers decide.
/// Uses `async_trait` so the mirror can hold a `Box<dyn HttpClient>`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed client with a fixed user agent, timeout and body limit.
pub struct ReqwestClient {
    client: reqwest::Client,
    max_bytes: u64,
}

impl ReqwestClient {
    pub fn new(feed: &FeedConfig, download: &DownloadConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(&feed.user_agent)
            .timeout(Duration::from_secs(feed.timeout_secs))
            .build()
            .map_err(|e| TransportError::Request {
                url: feed.base_url.clone(),
                message: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            max_bytes: download.max_bytes,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let request_error = |e: reqwest::Error| TransportError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };
        let too_large = || TransportError::TooLarge {
            url: url.to_string(),
            max_bytes: self.max_bytes,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status().as_u16();

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(request_error)?;
            if body.len() as u64 + chunk.len() as u64 > self.max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        tracing::trace!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
