//! Error handling for sweep operations.
//!
//! This module defines a comprehensive error type that covers all the
//! fatal ways a sweep can fail, from unreadable input files to report
//! write failures. Per-lookup DNS failures are deliberately NOT errors at
//! this level; they are contained inside the worker pool and only show up
//! as counters.

use std::fmt;

/// Main error type for sweep operations.
///
/// Only load-time and final-write failures terminate a run; everything that
/// happens per-domain is recorded in [`crate::RunStats`] instead.
#[derive(Debug, Clone)]
pub enum SweepError {
    /// File I/O errors when reading domain lists
    FileError { path: String, message: String },

    /// The input file contained no syntactically valid domains
    NoValidDomains { path: String },

    /// The report file could not be written. Fatal at the end of a run:
    /// results were computed but not persisted.
    OutputError { path: String, message: String },

    /// Configuration errors (invalid settings, unparseable config file)
    ConfigError { message: String },
}

impl SweepError {
    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new empty-input error.
    pub fn no_valid_domains<P: Into<String>>(path: P) -> Self {
        Self::NoValidDomains { path: path.into() }
    }

    /// Create a new report write error.
    pub fn output<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::OutputError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// True for failures that must abort before any worker starts.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::FileError { .. } | Self::NoValidDomains { .. }
        )
    }
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::NoValidDomains { path } => {
                write!(f, "No valid domains found in '{}'", path)
            }
            Self::OutputError { path, message } => {
                write!(f, "Failed to write report '{}': {}", path, message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for SweepError {}

impl From<toml::de::Error> for SweepError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("TOML parsing failed: {}", err),
        }
    }
}
