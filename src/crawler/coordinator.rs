//! Frontier coordinator
//!
//! The coordinator is the sole owner of the visited map and the only writer
//! of the canonical graph, so the map needs no locking. It consumes worker
//! results, merges each detached record into its canonical node, links
//! children, admits newly discovered URLs while the page budget allows, and
//! ends the crawl when the budget is exhausted or the pipeline has been
//! quiet for a full quiescence interval.
//!
//! Quiescence rather than in-flight counting: a worker whose fetch fails
//! publishes nothing, so counting admitted-but-unresolved URLs would hang on
//! the first dropped page. The timer trades a bounded wall-clock tail for
//! robustness to silent drops.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use url::Url;

use crate::config::CrawlConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::worker::spawn_workers;
use crate::page::{PageHandle, PageRecord};

/// Runs a crawl and returns the seed's canonical record
///
/// Never fails: fetch and extraction errors only drop the affected page,
/// and a partial graph is returned as-is.
pub(crate) async fn run(seed: Url, fetcher: Arc<dyn Fetcher>, config: CrawlConfig) -> PageHandle {
    let (work_tx, work_rx) = mpsc::channel::<Url>(config.channel_capacity);
    let (result_tx, mut result_rx) = mpsc::channel::<PageRecord>(config.channel_capacity);

    let origin = Arc::new(seed.clone());
    let work_rx = Arc::new(Mutex::new(work_rx));
    spawn_workers(config.workers, origin, fetcher, work_rx, result_tx);

    let root = PageRecord::shell(seed.clone());
    let mut visited: HashMap<Url, PageHandle> = HashMap::new();
    visited.insert(seed.clone(), Arc::clone(&root));

    if work_tx.send(seed).await.is_err() {
        tracing::error!("no workers accepted the seed");
        return root;
    }

    let mut received = false;
    let mut ticker = interval_at(
        Instant::now() + config.quiescence_interval,
        config.quiescence_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            maybe_record = result_rx.recv() => {
                let Some(record) = maybe_record else {
                    tracing::debug!("all workers exited, stopping");
                    break;
                };

                received = true;
                if !integrate(&mut visited, &work_tx, config.page_budget, record).await {
                    break;
                }
            }
            _ = ticker.tick() => {
                if received {
                    received = false;
                } else {
                    tracing::info!(
                        pages = visited.len(),
                        "no results for a full quiescence interval, stopping"
                    );
                    break;
                }
            }
        }
    }

    // Dropping the only work-queue sender closes it; workers drain whatever
    // is left and exit on their own.
    drop(work_tx);

    root
}

/// Merges one worker result into the graph
///
/// Returns `false` when the crawl should stop: the page budget is exhausted
/// or the work queue has no receivers left.
async fn integrate(
    visited: &mut HashMap<Url, PageHandle>,
    work_tx: &mpsc::Sender<Url>,
    budget: usize,
    record: PageRecord,
) -> bool {
    let mut detached = record;
    let children = std::mem::take(&mut detached.local_pages);
    let url = detached.url.clone();

    tracing::debug!(%url, "received page");

    // Results always correspond to a URL admitted earlier; a missing entry
    // still gets a fresh shell rather than losing the record.
    let canonical = match visited.get(&url) {
        Some(existing) => Arc::clone(existing),
        None => {
            let shell = PageRecord::shell(url.clone());
            visited.insert(url, Arc::clone(&shell));
            shell
        }
    };

    canonical
        .write()
        .expect("page lock poisoned")
        .absorb(detached);

    if visited.len() > budget {
        tracing::info!(pages = visited.len(), "page budget exhausted, stopping");
        return false;
    }

    for child in children {
        let child_url = child.read().expect("page lock poisoned").url.clone();

        match visited.get(&child_url) {
            Some(existing) => {
                // Already admitted: link the canonical node instead of the
                // detached shell.
                canonical
                    .write()
                    .expect("page lock poisoned")
                    .add_local_page(Arc::clone(existing));
            }
            None => {
                if visited.len() > budget {
                    tracing::debug!(%child_url, "page budget reached, not admitting");
                    continue;
                }

                visited.insert(child_url.clone(), Arc::clone(&child));
                canonical
                    .write()
                    .expect("page lock poisoned")
                    .add_local_page(child);

                if work_tx.send(child_url).await.is_err() {
                    tracing::warn!("work queue has no workers left, stopping");
                    return false;
                }
            }
        }
    }

    true
}
