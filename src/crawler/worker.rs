//! Fetch worker pool
//!
//! Workers are stateless: each one repeatedly takes a URL from the shared
//! work queue, fetches it, extracts a detached page record, and publishes
//! the record on the result queue. Fetch and extraction failures are logged
//! and the URL is dropped; nothing is retried.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use url::Url;

use crate::crawler::extractor::extract_page;
use crate::crawler::fetcher::Fetcher;
use crate::page::PageRecord;

/// Shared receiving side of the work queue
pub(crate) type WorkQueue = Arc<Mutex<mpsc::Receiver<Url>>>;

/// Spawns the fetch workers
///
/// The tasks run detached; each worker exits when the work queue closes or
/// when the result queue is dropped by the coordinator.
pub(crate) fn spawn_workers(
    count: usize,
    origin: Arc<Url>,
    fetcher: Arc<dyn Fetcher>,
    work_rx: WorkQueue,
    result_tx: mpsc::Sender<PageRecord>,
) {
    for id in 0..count {
        let origin = Arc::clone(&origin);
        let fetcher = Arc::clone(&fetcher);
        let work_rx = Arc::clone(&work_rx);
        let result_tx = result_tx.clone();

        tokio::spawn(worker_loop(id, origin, fetcher, work_rx, result_tx));
    }
}

async fn worker_loop(
    id: usize,
    origin: Arc<Url>,
    fetcher: Arc<dyn Fetcher>,
    work_rx: WorkQueue,
    result_tx: mpsc::Sender<PageRecord>,
) {
    loop {
        let url = {
            let mut rx = work_rx.lock().await;
            rx.recv().await
        };

        let Some(url) = url else {
            tracing::debug!(worker = id, "work queue closed, stopping");
            break;
        };

        tracing::debug!(worker = id, %url, "visiting");

        let document = match fetcher.fetch(url.as_str()).await {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(worker = id, %url, %error, "fetch failed");
                continue;
            }
        };
        tracing::trace!(worker = id, %url, status = document.status, "fetched");

        let record = match extract_page(&document.body, &url, &origin) {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(worker = id, %url, %error, "extraction failed");
                continue;
            }
        };

        // A closed result queue means the coordinator has finished; any
        // record still in flight is discarded with it.
        if result_tx.send(record).await.is_err() {
            tracing::debug!(worker = id, "result queue closed, stopping");
            break;
        }
    }
}
