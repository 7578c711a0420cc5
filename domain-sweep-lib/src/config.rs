//! Configuration file parsing and environment overrides.
//!
//! This module handles loading defaults from TOML files and from `DS_*`
//! environment variables. Precedence is resolved by the caller (the CLI
//! applies file < env < flags); here we only load and validate.

use crate::error::SweepError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
///
/// Users can create `.domain-sweep.toml` in the working directory or their
/// home directory to set defaults:
///
/// ```toml
/// [defaults]
/// threads = 16
/// timeout = 3
/// progress_every = 25
/// output_dir = "reports"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default worker thread count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Default per-lookup timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Default progress cadence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_every: Option<usize>,

    /// Default report output directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, SweepError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SweepError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SweepError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover and load the first config file found.
    ///
    /// Search order: `./.domain-sweep.toml`, then `~/.domain-sweep.toml`.
    /// Returns the default (empty) config when none exists.
    pub fn discover_and_load(&self) -> Result<FileConfig, SweepError> {
        for candidate in self.discovery_paths() {
            if candidate.exists() {
                if self.verbose {
                    tracing::info!("using config file: {}", candidate.display());
                }
                return self.load_file(&candidate);
            }
        }
        Ok(FileConfig::default())
    }

    fn discovery_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".domain-sweep.toml")];
        if let Some(home) = env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(".domain-sweep.toml"));
        }
        paths
    }
}

/// Overrides read from `DS_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub threads: Option<usize>,
    pub timeout: Option<u64>,
    pub progress_every: Option<usize>,
    pub output_dir: Option<String>,
}

/// Load environment overrides: `DS_THREADS`, `DS_TIMEOUT`,
/// `DS_PROGRESS_EVERY`, `DS_OUT_DIR`.
///
/// Unparseable values, and a zero `DS_TIMEOUT`, are ignored with a warning
/// rather than failing the run.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    env_config_from(|name| env::var(name).ok(), verbose)
}

fn env_config_from<F>(get: F, verbose: bool) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let parse_usize = |name: &str| -> Option<usize> {
        let raw = get(name)?;
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                if verbose {
                    tracing::warn!("ignoring {name}={raw}: not a valid number");
                }
                None
            }
        }
    };
    let parse_u64 = |name: &str| -> Option<u64> {
        let raw = get(name)?;
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                if verbose {
                    tracing::warn!("ignoring {name}={raw}: not a valid number");
                }
                None
            }
        }
    };

    let timeout = parse_u64("DS_TIMEOUT").and_then(|t| {
        if t == 0 {
            if verbose {
                tracing::warn!("ignoring DS_TIMEOUT=0: timeout must be at least 1 second");
            }
            None
        } else {
            Some(t)
        }
    });

    EnvConfig {
        threads: parse_usize("DS_THREADS"),
        timeout,
        progress_every: parse_usize("DS_PROGRESS_EVERY"),
        output_dir: get("DS_OUT_DIR"),
    }
}
