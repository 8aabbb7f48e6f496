//! Sitetree: a single-origin web crawler with tree output
//!
//! Starting from a seed URL, sitetree discovers every HTML page reachable on
//! the seed's host, records the scripts, stylesheets, images and outbound
//! links found on each page, and builds an in-memory site graph rooted at
//! the seed. The graph can be rendered as an indented text tree.

pub mod config;
pub mod crawler;
pub mod output;
pub mod page;
pub mod url;

use thiserror::Error;

/// Main error type for sitetree operations
#[derive(Debug, Error)]
pub enum SiteTreeError {
    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("failed to extract {url}: {message}")]
    Extract { url: String, message: String },

    #[error("invalid asset kind code: {0}")]
    InvalidAssetKind(u8),
}

/// Result type alias for sitetree operations
pub type Result<T> = std::result::Result<T, SiteTreeError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{crawl, crawl_with_fetcher, FetchedDocument, Fetcher, HttpFetcher};
pub use output::render;
pub use page::{Asset, AssetKind, PageHandle, PageRecord};
pub use crate::url::{canonicalize, classify_link, LinkClass};
