//! Retry-wrapped page fetching.

use crate::config::RetryConfig;
use crate::errors::{Result, SearchError};
use crate::retry::{with_retry, Sleeper};
use crate::transport::Transport;

/// Fetches result pages through a [`Transport`], retrying transport
/// failures with linear backoff.
#[derive(Debug)]
pub struct Fetcher<T, S> {
    transport: T,
    sleeper: S,
    retry: RetryConfig,
}

impl<T: Transport, S: Sleeper> Fetcher<T, S> {
    /// Creates a new fetcher.
    pub const fn new(transport: T, sleeper: S, retry: RetryConfig) -> Self {
        Self {
            transport,
            sleeper,
            retry,
        }
    }

    /// Fetches `endpoint` with `params`.
    ///
    /// Returns [`SearchError::RetriesExhausted`] once every attempt failed.
    /// Callers treat that as "no results", never as fatal.
    pub fn fetch(&self, endpoint: &str, params: &[(String, String)]) -> Result<String> {
        let max_attempts = self.retry.max_attempts();

        with_retry(
            &self.retry,
            &self.sleeper,
            |attempt| {
                tracing::debug!(endpoint, attempt, max_attempts, "Fetching");
                self.transport.get(endpoint, params).map_err(|e| {
                    tracing::warn!(endpoint, attempt, error = %e, "Request failed");
                    e
                })
            },
            SearchError::is_transient,
        )
        .map_err(|failure| {
            tracing::error!(
                endpoint,
                attempts = failure.attempts,
                error = %failure.last,
                "Giving up on request"
            );
            SearchError::RetriesExhausted {
                attempts: failure.attempts,
                last: Box::new(failure.last),
            }
        })
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// The sleeper used for backoff.
    pub const fn sleeper(&self) -> &S {
        &self.sleeper
    }
}
