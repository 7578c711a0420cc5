//! DNS resolution for a single domain, bounded by a timeout.
//!
//! The [`Resolve`] trait is the seam between the worker pool and the
//! network: production code uses [`DnsResolver`] (hickory), tests inject
//! scripted resolvers. One lookup per call, tri-state outcome.

use crate::types::{LookupOutcome, MAX_TIMEOUT_SECS};
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use std::future::Future;
use std::time::Duration;

/// One name-resolution attempt for a single domain.
///
/// Implementations must never panic; every failure mode maps onto a
/// [`LookupOutcome`] so a bad lookup can never take down a worker.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, domain: &str) -> LookupOutcome;
}

/// Production resolver backed by the system DNS configuration.
///
/// Each lookup is wrapped in a hard deadline: past it the in-flight lookup
/// future is dropped and the outcome is a [`LookupOutcome::LookupError`].
/// The worker loop therefore has bounded latency even on a dead network.
pub struct DnsResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl DnsResolver {
    /// Create a resolver with the given per-lookup timeout (clamped to
    /// 1..=[`MAX_TIMEOUT_SECS`] seconds).
    ///
    /// Reads the system resolver configuration (/etc/resolv.conf) and falls
    /// back to well-known public defaults when that is unavailable.
    pub fn new(timeout: Duration) -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            tracing::debug!("system resolver config unavailable ({e}), using defaults");
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self {
            resolver,
            timeout: timeout.clamp(
                Duration::from_secs(1),
                Duration::from_secs(MAX_TIMEOUT_SECS),
            ),
        }
    }

    /// The effective (clamped) per-lookup timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn resolve(&self, domain: &str) -> LookupOutcome {
        let lookup = async {
            self.resolver.lookup_ip(domain).await.map(|_| ())
        };
        classify_lookup(self.timeout, lookup).await
    }
}

/// Run one lookup future under a hard deadline and map the result onto the
/// tri-state outcome.
///
/// Shared by [`DnsResolver`] and the timeout tests, which substitute a
/// never-completing future for the real lookup.
pub(crate) async fn classify_lookup<F>(deadline: Duration, lookup: F) -> LookupOutcome
where
    F: Future<Output = Result<(), ResolveError>>,
{
    match tokio::time::timeout(deadline, lookup).await {
        Ok(Ok(())) => LookupOutcome::Taken,
        Ok(Err(e)) => classify_resolve_error(&e),
        Err(_) => LookupOutcome::LookupError(format!("lookup timed out after {:?}", deadline)),
    }
}

/// Map a resolver error onto an outcome.
///
/// Only the "no records" class counts as available. Everything else
/// (connection refusals, SERVFAIL, protocol errors) is a countable error,
/// never reclassified as available.
fn classify_resolve_error(err: &ResolveError) -> LookupOutcome {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => LookupOutcome::Available,
        other => LookupOutcome::LookupError(other.to_string()),
    }
}
