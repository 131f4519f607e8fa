//! Result and error types for Escaparate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Escaparate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a remote document.
///
/// Timeouts are deliberately absent: "not found in time" is an expected
/// outcome, carried by [`crate::wait::PollOutcome`], not an error. This enum
/// covers the faults that must reach the test boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote-document capability itself failed
    #[error("remote document fault: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// A node handle outlived the element it pointed at
    #[error("node handle is stale (element detached from the document)")]
    StaleNode,

    /// Navigation to a URL failed
    #[error("navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// An expected-data file exists but could not be parsed
    #[error("expected-data file {path} is not valid: {message}")]
    Testdata {
        /// Path of the offending file
        path: PathBuf,
        /// Parse error message
        message: String,
    },

    /// Required configuration is missing or malformed
    #[error("configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a driver fault from any message
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a configuration error from any message
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is the transient staleness a poll loop absorbs
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::StaleNode)
    }
}
