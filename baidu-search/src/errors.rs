//! Error types for the search client.
//!
//! None of these cross the public search operations: every failure is
//! logged and degraded to an empty or partial result list. They exist so the
//! internal stages can propagate failures with `?` and so the logs carry a
//! precise cause.

use thiserror::Error;

/// The main error type for search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The HTTP client reported a failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Unexpected status code: {0}")]
    Status(u16),

    /// A transport-level failure reported by a non-HTTP transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Every attempt failed.
    #[error("Request failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made, including the first one.
        attempts: usize,
        /// The error from the final attempt.
        last: Box<SearchError>,
    },

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A matching rule could not be compiled.
    #[error("Invalid extraction rule: {0}")]
    InvalidRule(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SearchError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Configuration errors are permanent; everything that happened on the
    /// wire is worth retrying.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status(_) | Self::Transport(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;
