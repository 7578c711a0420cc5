//! Thread-safe result aggregation and progress reporting.
//!
//! One [`RunStats`] is shared by every worker in a sweep. Counters are
//! atomic; the available-domain list sits behind a mutex whose critical
//! section is a single push. No I/O ever happens under the lock: progress
//! notifications are handed back to the caller as plain snapshots and
//! delivered outside it.

use crate::types::LookupOutcome;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Point-in-time counters exposed to progress observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub processed: usize,
    pub total: usize,
    pub available: usize,
    pub errors: usize,
}

impl ProgressSnapshot {
    /// Completion percentage, 0.0 when the total is zero.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Receives progress notifications on the configured cadence.
///
/// Called from worker tasks, outside any lock; implementations may print or
/// log but must not block for long; they hold up exactly one worker.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, snapshot: ProgressSnapshot);
}

/// Default observer: structured log line per notification.
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&self, s: ProgressSnapshot) {
        tracing::info!(
            "progress: {}/{} domains ({:.1}%) - {} available, {} errors",
            s.processed,
            s.total,
            s.percent(),
            s.available,
            s.errors
        );
    }
}

/// Shared, mutable run state: counters plus the available-domain list.
///
/// Created at run start, mutated by workers throughout, finalized
/// (read-only) once the pool drains. After drain,
/// `processed == available + taken + errors` exactly.
pub struct RunStats {
    total: usize,
    cadence: usize,
    processed: AtomicUsize,
    available: AtomicUsize,
    taken: AtomicUsize,
    errors: AtomicUsize,
    available_domains: Mutex<Vec<String>>,
}

impl RunStats {
    /// Create run state for `total` queued domains with the given progress
    /// cadence (0 disables notifications).
    pub fn new(total: usize, cadence: usize) -> Self {
        Self {
            total,
            cadence,
            processed: AtomicUsize::new(0),
            available: AtomicUsize::new(0),
            taken: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            available_domains: Mutex::new(Vec::new()),
        }
    }

    /// Record one completed lookup. Safe to call concurrently from any
    /// worker.
    ///
    /// Returns a snapshot when this outcome lands on the cadence boundary,
    /// so the caller can notify its observer without holding any lock here.
    pub fn record(&self, domain: &str, outcome: &LookupOutcome) -> Option<ProgressSnapshot> {
        match outcome {
            LookupOutcome::Available => {
                self.available.fetch_add(1, Ordering::SeqCst);
                let mut list = self
                    .available_domains
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                list.push(domain.to_string());
            }
            LookupOutcome::Taken => {
                self.taken.fetch_add(1, Ordering::SeqCst);
            }
            LookupOutcome::LookupError(reason) => {
                self.errors.fetch_add(1, Ordering::SeqCst);
                tracing::debug!("lookup error for {domain}: {reason}");
            }
        }

        // Category counter first, processed last: a cadence snapshot never
        // shows processed ahead of the per-category sums.
        let processed = self.processed.fetch_add(1, Ordering::SeqCst) + 1;
        if self.cadence > 0 && processed % self.cadence == 0 {
            Some(self.snapshot())
        } else {
            None
        }
    }

    /// Current counters. Exact once the pool has drained.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            processed: self.processed.load(Ordering::SeqCst),
            total: self.total,
            available: self.available.load(Ordering::SeqCst),
            errors: self.errors.load(Ordering::SeqCst),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    pub fn available_count(&self) -> usize {
        self.available.load(Ordering::SeqCst)
    }

    pub fn taken_count(&self) -> usize {
        self.taken.load(Ordering::SeqCst)
    }

    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    /// The available domains recorded so far, in completion order.
    pub fn available_domains(&self) -> Vec<String> {
        self.available_domains
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_record_updates_counters() {
        let stats = RunStats::new(3, 0);
        stats.record("a.com", &LookupOutcome::Available);
        stats.record("b.com", &LookupOutcome::Taken);
        stats.record("c.com", &LookupOutcome::LookupError("boom".into()));

        assert_eq!(stats.processed(), 3);
        assert_eq!(stats.available_count(), 1);
        assert_eq!(stats.taken_count(), 1);
        assert_eq!(stats.error_count(), 1);
        assert_eq!(stats.available_domains(), vec!["a.com".to_string()]);
    }

    #[test]
    fn test_counters_balance() {
        let stats = RunStats::new(10, 0);
        for i in 0..10 {
            let outcome = match i % 3 {
                0 => LookupOutcome::Available,
                1 => LookupOutcome::Taken,
                _ => LookupOutcome::LookupError("x".into()),
            };
            stats.record(&format!("d{i}.com"), &outcome);
        }
        assert_eq!(
            stats.processed(),
            stats.available_count() + stats.taken_count() + stats.error_count()
        );
    }

    #[test]
    fn test_cadence_snapshots() {
        let stats = RunStats::new(10, 3);
        let mut notifications = 0;
        for i in 0..10 {
            if let Some(s) = stats.record(&format!("d{i}.com"), &LookupOutcome::Taken) {
                notifications += 1;
                assert_eq!(s.processed % 3, 0);
                assert_eq!(s.total, 10);
            }
        }
        // 10 records at cadence 3 -> snapshots at 3, 6, 9
        assert_eq!(notifications, 3);
    }

    #[test]
    fn test_cadence_zero_never_notifies() {
        let stats = RunStats::new(5, 0);
        for i in 0..5 {
            assert!(stats
                .record(&format!("d{i}.com"), &LookupOutcome::Taken)
                .is_none());
        }
    }

    #[test]
    fn test_percent() {
        let s = ProgressSnapshot {
            processed: 25,
            total: 100,
            available: 0,
            errors: 0,
        };
        assert!((s.percent() - 25.0).abs() < f64::EPSILON);

        let empty = ProgressSnapshot {
            processed: 0,
            total: 0,
            available: 0,
            errors: 0,
        };
        assert_eq!(empty.percent(), 0.0);
    }

    #[test]
    fn test_concurrent_recording_is_exact() {
        let stats = Arc::new(RunStats::new(800, 0));
        let mut handles = Vec::new();
        for t in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    let domain = format!("w{t}-{i}.com");
                    let outcome = if i % 2 == 0 {
                        LookupOutcome::Available
                    } else {
                        LookupOutcome::Taken
                    };
                    stats.record(&domain, &outcome);
                }
            }));
        }
        for h in handles {
            h.join().expect("recorder thread panicked");
        }

        assert_eq!(stats.processed(), 800);
        assert_eq!(stats.available_count(), 400);
        assert_eq!(stats.taken_count(), 400);
        assert_eq!(stats.available_domains().len(), 400);
    }
}
