//! Crawl configuration
//!
//! All knobs arrive from the command line; this module holds the typed
//! configuration shared by the coordinator and the worker pool.

use std::time::Duration;

use crate::SiteTreeError;

/// Configuration for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Number of fetch workers
    pub workers: usize,

    /// Maximum number of distinct URLs to admit to the crawl
    pub page_budget: usize,

    /// How long the coordinator waits without receiving a result before it
    /// declares the pipeline idle and stops
    pub quiescence_interval: Duration,

    /// Capacity of the work queue and the result queue
    pub channel_capacity: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            page_budget: 100,
            quiescence_interval: Duration::from_secs(1),
            channel_capacity: 10_000,
        }
    }
}

impl CrawlConfig {
    /// Validates the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Configuration is usable
    /// * `Err(SiteTreeError::Argument)` - A knob is outside its valid range
    pub fn validate(&self) -> Result<(), SiteTreeError> {
        if self.workers == 0 {
            return Err(SiteTreeError::Argument(
                "workers must be at least 1".to_string(),
            ));
        }

        if self.channel_capacity == 0 {
            return Err(SiteTreeError::Argument(
                "channel capacity must be at least 1".to_string(),
            ));
        }

        if self.quiescence_interval.is_zero() {
            return Err(SiteTreeError::Argument(
                "quiescence interval must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
