//! # Domain Sweep Library
//!
//! A library for sweeping candidate domain lists with concurrent DNS
//! lookups, collecting the names that fail to resolve into a timestamped
//! report.
//!
//! Resolution failure is a heuristic availability signal only. This is not
//! a WHOIS or registry query, and a "no such name" answer is never a
//! registration guarantee.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_sweep_lib::{DomainSweeper, write_report};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sweeper = DomainSweeper::new();
//!     let report = sweeper.run("domains.txt").await?;
//!     let path = write_report(&report, std::path::Path::new("."))?;
//!
//!     println!("{} available domains written to {}", report.available_count, path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Bounded worker pool**: fixed number of concurrent lookups over a
//!   shared queue
//! - **Deadline-bounded lookups**: a slow nameserver can stall one worker
//!   for at most the configured timeout
//! - **Conservative classification**: only "no such name" counts as
//!   available; transient failures are counted separately
//! - **Mockable resolver seam**: inject scripted resolvers for tests

// Re-export main public API types and functions
pub use config::{load_env_config, ConfigManager, DefaultsConfig, EnvConfig, FileConfig};
pub use error::SweepError;
pub use report::write_report;
pub use resolver::{DnsResolver, Resolve};
pub use stats::{LogProgress, ProgressObserver, ProgressSnapshot, RunStats};
pub use sweeper::DomainSweeper;
pub use types::{LookupOutcome, RunReport, SweepConfig, MAX_TIMEOUT_SECS};
pub use utils::{is_valid_domain, parse_domain_line};

// Internal modules - these are not part of the public API
mod concurrent;
mod config;
mod error;
mod report;
mod resolver;
mod stats;
mod sweeper;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SweepError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
