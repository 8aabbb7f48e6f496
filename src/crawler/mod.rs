//! Crawl engine
//!
//! A bounded-concurrency producer/consumer pipeline: the coordinator seeds
//! the work queue, a fixed pool of workers fetches and extracts pages, and
//! the coordinator merges each result into the site graph, enqueueing newly
//! discovered same-host pages until the page budget is reached or the
//! pipeline goes quiet.

mod coordinator;
mod extractor;
mod fetcher;
mod worker;

pub use extractor::extract_page;
pub use fetcher::{FetchError, FetchedDocument, Fetcher, HttpFetcher};

use std::sync::Arc;

use url::Url;

use crate::config::CrawlConfig;
use crate::page::PageHandle;
use crate::url::canonicalize;
use crate::Result;

/// Crawls `seed` over HTTP and returns the root of the site graph
///
/// The crawl never fails once it has started: fetch and extraction errors
/// only drop the affected page and the (possibly partial) graph is returned
/// as-is. The only errors here are an unusable configuration or seed URL.
///
/// # Example
///
/// ```no_run
/// use sitetree::config::CrawlConfig;
/// use sitetree::crawler::crawl;
/// use sitetree::output::render;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let root = crawl("https://example.com", CrawlConfig::default()).await?;
/// print!("{}", render(&root));
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed: &str, config: CrawlConfig) -> Result<PageHandle> {
    let fetcher = HttpFetcher::new()?;
    crawl_with_fetcher(seed, Arc::new(fetcher), config).await
}

/// Crawls `seed` with an injected fetch capability
///
/// This is the seam tests use to run the full pipeline against canned
/// documents.
pub async fn crawl_with_fetcher(
    seed: &str,
    fetcher: Arc<dyn Fetcher>,
    config: CrawlConfig,
) -> Result<PageHandle> {
    config.validate()?;
    let seed = canonicalize(&Url::parse(seed)?);

    Ok(coordinator::run(seed, fetcher, config).await)
}
