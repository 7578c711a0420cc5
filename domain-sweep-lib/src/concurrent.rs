//! The worker pool: bounded fan-out over a shared domain queue.
//!
//! Exactly `workers` tasks pull domains from one bounded channel, resolve
//! each, and record the outcome with the shared [`RunStats`]. The loader is
//! the producer; once it finishes, the closed and drained channel shuts all
//! workers down. A failed or timed-out lookup is contained to its own
//! iteration and never affects the other workers' progress.

use crate::resolver::Resolve;
use crate::stats::{ProgressObserver, RunStats};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// Queue capacity. Bounded so a huge input file never balloons memory;
/// the producer simply awaits when workers lag behind.
const QUEUE_DEPTH: usize = 256;

/// Run the pool to completion over the given domains.
///
/// Workers are spawned before the queue is fed so a bounded channel can
/// never deadlock the producer. Returns once every queued domain has a
/// recorded outcome and every worker has exited.
pub(crate) async fn run_pool(
    domains: Vec<String>,
    workers: usize,
    resolver: Arc<dyn Resolve>,
    stats: Arc<RunStats>,
    progress: Arc<dyn ProgressObserver>,
) {
    let workers = workers.max(1);
    let (tx, rx) = mpsc::channel::<String>(QUEUE_DEPTH);
    // mpsc receivers are single-consumer; the mutex turns ours into the
    // shared queue the workers pull from. Held only across the dequeue,
    // never across a lookup.
    let rx = Arc::new(Mutex::new(rx));

    let mut pool = JoinSet::new();
    for worker_id in 0..workers {
        let rx = Arc::clone(&rx);
        let resolver = Arc::clone(&resolver);
        let stats = Arc::clone(&stats);
        let progress = Arc::clone(&progress);

        pool.spawn(async move {
            tracing::debug!("worker {worker_id} started");
            loop {
                let next = { rx.lock().await.recv().await };
                let Some(domain) = next else {
                    // Queue closed and drained: exit.
                    break;
                };

                let outcome = resolver.resolve(&domain).await;
                tracing::trace!("worker {worker_id}: {domain} -> {outcome}");

                if let Some(snapshot) = stats.record(&domain, &outcome) {
                    progress.on_progress(snapshot);
                }
            }
            tracing::debug!("worker {worker_id} finished");
        });
    }

    // Feed the queue. Awaits when the bounded channel is full; errors only
    // if every worker is gone, which cannot happen before the channel
    // closes.
    for domain in domains {
        if tx.send(domain).await.is_err() {
            break;
        }
    }
    drop(tx);

    while let Some(joined) = pool.join_next().await {
        if let Err(e) = joined {
            // A panicked worker loses its in-flight domain; the rest of the
            // pool keeps draining, but the loss must be visible.
            tracing::error!("worker task failed: {e}");
        }
    }
}
