//! Bounded retry with linear backoff.
//!
//! The loop is an explicit iteration over attempt numbers, so the attempt
//! count is bounded by [`RetryConfig::max_attempts`] and never grows the
//! stack. Waiting goes through the [`Sleeper`] seam.

use std::fmt::Display;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use crate::config::RetryConfig;

/// Blocks the current thread for a duration.
#[cfg_attr(test, automock)]
pub trait Sleeper {
    /// Sleeps for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// State tracking for retry operations.
#[derive(Debug, Default)]
pub struct RetryState {
    /// Number of attempts made so far.
    pub attempt: usize,
}

impl RetryState {
    /// Creates a new retry state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no attempts remain.
    #[must_use]
    pub fn is_exhausted(&self, config: &RetryConfig) -> bool {
        self.attempt >= config.max_attempts()
    }
}

/// Outcome of a retry decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay.
    Retry(Duration),
    /// No more retries, give up.
    GiveUp,
    /// Don't retry, the error is not retryable.
    NotRetryable,
}

/// Decides what to do after a failed attempt.
///
/// `state.attempt` must already count the attempt that just failed.
#[must_use]
pub fn should_retry(state: &RetryState, config: &RetryConfig, retryable: bool) -> RetryDecision {
    if !retryable {
        return RetryDecision::NotRetryable;
    }
    if state.is_exhausted(config) {
        return RetryDecision::GiveUp;
    }
    RetryDecision::Retry(config.delay_for_retry(state.attempt))
}

/// Error returned by [`with_retry`] when every attempt failed.
#[derive(Debug)]
pub struct RetryFailure<E> {
    /// Attempts made, including the first one.
    pub attempts: usize,
    /// The last error seen.
    pub last: E,
}

/// Executes an operation with linear-backoff retry.
///
/// `operation` receives the 1-based attempt number. `retryable` classifies
/// errors; a non-retryable error ends the loop immediately.
pub fn with_retry<T, E, F, R, S>(
    config: &RetryConfig,
    sleeper: &S,
    mut operation: F,
    retryable: R,
) -> Result<T, RetryFailure<E>>
where
    F: FnMut(usize) -> Result<T, E>,
    R: Fn(&E) -> bool,
    E: Display,
    S: Sleeper + ?Sized,
{
    let mut state = RetryState::new();

    loop {
        state.attempt += 1;
        match operation(state.attempt) {
            Ok(value) => return Ok(value),
            Err(e) => match should_retry(&state, config, retryable(&e)) {
                RetryDecision::Retry(delay) => {
                    tracing::info!(
                        attempt = state.attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "Retrying after error"
                    );
                    sleeper.sleep(delay);
                }
                RetryDecision::GiveUp | RetryDecision::NotRetryable => {
                    return Err(RetryFailure {
                        attempts: state.attempt,
                        last: e,
                    });
                }
            },
        }
    }
}
