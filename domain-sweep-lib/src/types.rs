//! Core data types for DNS availability sweeps.
//!
//! This module defines the main data structures used throughout the library,
//! including lookup outcomes, sweep configuration, and the final run report.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Hard ceiling on the per-lookup timeout, in seconds.
///
/// Any configured timeout above this is clamped down. Matches the cap the
/// tool has always enforced so a mistyped `--timeout 250` cannot stall a
/// whole sweep.
pub const MAX_TIMEOUT_SECS: u64 = 25;

/// Outcome of a single DNS lookup for one domain.
///
/// Produced exactly once per validated domain by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LookupOutcome {
    /// The name failed to resolve with a "no such name" class of error.
    /// Heuristic signal that the domain may be unregistered, not a
    /// registry confirmation.
    #[serde(rename = "available")]
    Available,

    /// The name resolved to at least one address; it is in active DNS use.
    #[serde(rename = "taken")]
    Taken,

    /// The lookup failed for some other reason: timeout, network
    /// unreachable, temporary server failure. Counted separately and never
    /// classified as available, to avoid false positives from transient
    /// failures.
    #[serde(rename = "error")]
    LookupError(String),
}

impl std::fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupOutcome::Available => write!(f, "available"),
            LookupOutcome::Taken => write!(f, "taken"),
            LookupOutcome::LookupError(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// Configuration options for a sweep.
///
/// This struct allows fine-tuning of the sweep behavior, including worker
/// count, per-lookup timeout, and progress cadence.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Number of concurrent workers pulling from the shared queue.
    /// Default: 8, minimum: 1.
    pub workers: usize,

    /// Timeout for each individual DNS lookup.
    /// Default: 5 seconds, clamped to 1..=[`MAX_TIMEOUT_SECS`] seconds.
    pub timeout: Duration,

    /// Emit a progress notification every N recorded outcomes.
    /// Default: 10. Zero disables progress reporting.
    pub progress_every: usize,

    /// Directory where the report file is written.
    /// Default: current directory.
    pub output_dir: PathBuf,
}

impl Default for SweepConfig {
    /// Create a sensible default configuration.
    ///
    /// These defaults mirror the classic CLI defaults: 8 workers, 5 second
    /// timeout, progress every 10 domains, report in the current directory.
    fn default() -> Self {
        Self {
            workers: 8,
            timeout: Duration::from_secs(5),
            progress_every: 10,
            output_dir: PathBuf::from("."),
        }
    }
}

impl SweepConfig {
    /// Set the worker count. Values below 1 are raised to 1.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the per-lookup timeout, clamped to 1..=[`MAX_TIMEOUT_SECS`]
    /// seconds. A zero deadline would fail every lookup instantly, so it is
    /// raised to the floor instead.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.clamp(
            Duration::from_secs(1),
            Duration::from_secs(MAX_TIMEOUT_SECS),
        );
        self
    }

    /// Set the progress cadence (0 disables progress notifications).
    pub fn with_progress_every(mut self, every: usize) -> Self {
        self.progress_every = every;
        self
    }

    /// Set the directory the report file is written to.
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// Final report of a completed sweep.
///
/// Created once the queue has drained and every submitted domain has a
/// recorded outcome. This is the sole content source for the output file.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Path of the input file the domains were loaded from.
    pub input_file: String,

    /// Wall-clock start of the run; also names the report file.
    pub started_at: DateTime<Local>,

    /// Domains that passed validation and were looked up.
    pub checked: usize,

    /// Domains whose lookup came back "no such name".
    pub available_count: usize,

    /// Domains that resolved successfully.
    pub taken: usize,

    /// Lookups that failed with a timeout or transient error.
    pub errors: usize,

    /// Input lines dropped by the validator (counted, never fatal).
    pub rejected_lines: usize,

    /// Total sweep duration in seconds.
    pub elapsed_seconds: f64,

    /// Available domains in completion order. Order is nondeterministic
    /// across runs; membership is not.
    pub available: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.workers, 8);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.progress_every, 10);
    }

    #[test]
    fn test_workers_floor_is_one() {
        let config = SweepConfig::default().with_workers(0);
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn test_timeout_clamped_to_max() {
        let config = SweepConfig::default().with_timeout(Duration::from_secs(120));
        assert_eq!(config.timeout, Duration::from_secs(MAX_TIMEOUT_SECS));

        let config = SweepConfig::default().with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_zero_timeout_floored_to_one_second() {
        let config = SweepConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(LookupOutcome::Available.to_string(), "available");
        assert_eq!(LookupOutcome::Taken.to_string(), "taken");
        assert_eq!(
            LookupOutcome::LookupError("timed out".to_string()).to_string(),
            "error: timed out"
        );
    }
}
