// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for sweepcat.
//!
//! Provides error types for recording access operations:
//! - File open and decode failures
//! - Begin-timestamp resolution (missing channels, invalid UTC headers)
//! - Catalog descriptor configuration
//! - Read request buffer geometry

use std::fmt;
use std::path::Path;

/// Errors that can occur during recording access operations.
#[derive(Debug, Clone)]
pub enum AccessError {
    /// The decoder could not open or parse a recording file
    Open {
        /// File path that failed to open
        path: String,
        /// Underlying decoder error message
        reason: String,
    },

    /// A file exposes no channels, so its begin timestamp cannot be resolved
    NoChannels {
        /// File path with zero channels
        path: String,
    },

    /// A file's embedded UTC header is invalid or missing
    InvalidTime {
        /// File path with the bad header
        path: String,
        /// Why the header was rejected
        reason: String,
    },

    /// Catalog descriptor is missing, unparseable, or names an unknown catalog
    Configuration {
        /// Description of the configuration problem
        reason: String,
    },

    /// A read request's buffers do not match the window/period geometry
    BufferMismatch {
        /// Sample count the window and period imply
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Other error
    Other(String),
}

impl AccessError {
    /// Create a file-open error.
    pub fn open(path: &Path, reason: impl Into<String>) -> Self {
        AccessError::Open {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Create a "no channels" error.
    pub fn no_channels(path: &Path) -> Self {
        AccessError::NoChannels {
            path: path.display().to_string(),
        }
    }

    /// Create an invalid UTC header error.
    pub fn invalid_time(path: &Path, reason: impl Into<String>) -> Self {
        AccessError::InvalidTime {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(reason: impl Into<String>) -> Self {
        AccessError::Configuration {
            reason: reason.into(),
        }
    }

    /// Create a buffer geometry mismatch error.
    pub fn buffer_mismatch(expected: usize, actual: usize) -> Self {
        AccessError::BufferMismatch { expected, actual }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            AccessError::Open { path, reason } => {
                vec![("path", path.clone()), ("reason", reason.clone())]
            }
            AccessError::NoChannels { path } => vec![("path", path.clone())],
            AccessError::InvalidTime { path, reason } => {
                vec![("path", path.clone()), ("reason", reason.clone())]
            }
            AccessError::Configuration { reason } => vec![("reason", reason.clone())],
            AccessError::BufferMismatch { expected, actual } => vec![
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            AccessError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::Open { path, reason } => {
                write!(f, "Failed to open recording '{path}': {reason}")
            }
            AccessError::NoChannels { path } => {
                write!(f, "Recording '{path}' has no channels")
            }
            AccessError::InvalidTime { path, reason } => {
                write!(f, "Invalid UTC header in '{path}': {reason}")
            }
            AccessError::Configuration { reason } => {
                write!(f, "Configuration error: {reason}")
            }
            AccessError::BufferMismatch { expected, actual } => write!(
                f,
                "Buffer mismatch: window and period imply {expected} samples, buffer holds {actual}"
            ),
            AccessError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for AccessError {}

impl From<std::io::Error> for AccessError {
    fn from(err: std::io::Error) -> Self {
        AccessError::Other(format!("I/O error: {err}"))
    }
}

/// Result type for sweepcat operations.
pub type Result<T> = std::result::Result<T, AccessError>;
