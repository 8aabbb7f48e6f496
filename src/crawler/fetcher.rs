//! HTTP fetch capability
//!
//! The crawl engine reaches the network only through the [`Fetcher`] trait,
//! so tests can substitute an in-memory implementation. [`HttpFetcher`] is
//! the real one, built on a shared reqwest client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use thiserror::Error;

/// User agent reported by the HTTP fetcher
const USER_AGENT: &str = concat!("sitetree/", env!("CARGO_PKG_VERSION"));

/// Errors surfaced by a fetch capability
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed (connection, timeout, body read)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The capability has no document for this URL
    #[error("{0}")]
    Unavailable(String),
}

/// A fetched document
///
/// The crawler only consumes the body; the status is carried for logging.
/// Non-2xx responses are not errors: whatever body the server returned is
/// handed to the extractor best-effort.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub status: u16,
    pub body: String,
}

/// Capability for retrieving a document over HTTP
///
/// Implementations must be safe for concurrent invocation; every worker in
/// the pool shares a single instance.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError>;
}

/// [`Fetcher`] backed by a [`reqwest::Client`]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with the crawler's client configuration
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Successfully built HTTP client
    /// * `Err(FetchError)` - Failed to build client
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(10))
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(FetchedDocument { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_fetcher() {
        assert!(HttpFetcher::new().is_ok());
    }

    #[test]
    fn test_user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("sitetree/"));
    }
}
