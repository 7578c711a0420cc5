//! Run coordination: load, sweep, report.
//!
//! [`DomainSweeper`] orchestrates a full pass: read and validate the input
//! file, feed the worker pool, wait for the queue to drain, and hand back a
//! [`RunReport`]. Fatal conditions (unreadable input, zero valid domains)
//! abort before any worker starts.

use crate::concurrent::run_pool;
use crate::error::SweepError;
use crate::resolver::{DnsResolver, Resolve};
use crate::stats::{LogProgress, ProgressObserver, RunStats};
use crate::types::{RunReport, SweepConfig};
use crate::utils::parse_domain_line;
use std::sync::Arc;
use std::time::Instant;

/// Validated domains from one input file, plus the count of dropped lines.
#[derive(Debug)]
pub(crate) struct LoadedDomains {
    pub domains: Vec<String>,
    pub rejected: usize,
}

/// Read the input file and validate every line.
///
/// Blank lines are skipped silently; non-blank lines that fail validation
/// are counted and logged but never fatal. An unreadable file or a file
/// with zero valid domains is a fatal load failure.
pub(crate) fn load_domains(path: &str) -> Result<LoadedDomains, SweepError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SweepError::file_error(path, e.to_string()))?;

    let mut domains = Vec::new();
    let mut rejected = 0usize;

    for line in content.lines() {
        match parse_domain_line(line) {
            Some(domain) => domains.push(domain.to_string()),
            None => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    rejected += 1;
                    tracing::warn!("skipping invalid domain: {trimmed}");
                }
            }
        }
    }

    if domains.is_empty() {
        return Err(SweepError::no_valid_domains(path));
    }

    Ok(LoadedDomains { domains, rejected })
}

/// Coordinates a full availability sweep.
///
/// # Example
///
/// ```rust,no_run
/// use domain_sweep_lib::{DomainSweeper, SweepConfig};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = SweepConfig::default()
///         .with_workers(16)
///         .with_timeout(Duration::from_secs(3));
///     let sweeper = DomainSweeper::with_config(config);
///     let report = sweeper.run("domains.txt").await?;
///     println!("{} available of {} checked", report.available_count, report.checked);
///     Ok(())
/// }
/// ```
pub struct DomainSweeper {
    config: SweepConfig,
    resolver: Arc<dyn Resolve>,
    progress: Arc<dyn ProgressObserver>,
}

impl DomainSweeper {
    /// Create a sweeper with default configuration and the system DNS
    /// resolver.
    pub fn new() -> Self {
        Self::with_config(SweepConfig::default())
    }

    /// Create a sweeper with custom configuration.
    pub fn with_config(config: SweepConfig) -> Self {
        let resolver = Arc::new(DnsResolver::new(config.timeout));
        Self {
            config,
            resolver,
            progress: Arc::new(LogProgress),
        }
    }

    /// Create a sweeper with an injected resolver.
    ///
    /// The seam used by tests to script lookup outcomes deterministically;
    /// also handy for callers with their own resolver stack.
    pub fn with_resolver(config: SweepConfig, resolver: Arc<dyn Resolve>) -> Self {
        Self {
            config,
            resolver,
            progress: Arc::new(LogProgress),
        }
    }

    /// Replace the progress observer (default logs via `tracing`).
    pub fn with_progress_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.progress = observer;
        self
    }

    /// Get the current configuration for this sweeper.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run one full pass over the given input file.
    ///
    /// Loads and validates domains, runs the worker pool until the queue is
    /// drained and every submitted domain has a recorded outcome, then
    /// returns the finalized report.
    ///
    /// # Errors
    ///
    /// Returns `SweepError` if the input file is missing or unreadable, or
    /// if it contains no syntactically valid domains. Per-lookup failures
    /// are never errors here; they appear in the report's error count.
    pub async fn run(&self, input_file: &str) -> Result<RunReport, SweepError> {
        let started_at = chrono::Local::now();
        let clock = Instant::now();

        let loaded = load_domains(input_file)?;
        let checked = loaded.domains.len();
        tracing::info!(
            "loaded {} domains from {} ({} lines rejected), sweeping with {} workers",
            checked,
            input_file,
            loaded.rejected,
            self.config.workers
        );

        let stats = Arc::new(RunStats::new(checked, self.config.progress_every));
        run_pool(
            loaded.domains,
            self.config.workers,
            Arc::clone(&self.resolver),
            Arc::clone(&stats),
            Arc::clone(&self.progress),
        )
        .await;

        let report = RunReport {
            input_file: input_file.to_string(),
            started_at,
            checked,
            available_count: stats.available_count(),
            taken: stats.taken_count(),
            errors: stats.error_count(),
            rejected_lines: loaded.rejected,
            elapsed_seconds: clock.elapsed().as_secs_f64(),
            available: stats.available_domains(),
        };

        tracing::info!(
            "completed: checked {} domains, {} available, {} taken, {} errors in {:.1}s",
            report.checked,
            report.available_count,
            report.taken,
            report.errors,
            report.elapsed_seconds
        );

        Ok(report)
    }
}

impl Default for DomainSweeper {
    fn default() -> Self {
        Self::new()
    }
}
