//! Scripted transport and sleeper stubs.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use crate::errors::{Result, SearchError};
use crate::retry::Sleeper;
use crate::transport::Transport;

/// A recorded GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Requested URL.
    pub url: String,
    /// Query parameters.
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of the first parameter named `key`.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A transport that replays scripted responses and records every call.
///
/// Once the script runs out, the fallback response is returned.
#[derive(Debug)]
pub struct StubTransport {
    script: Mutex<VecDeque<std::result::Result<String, u16>>>,
    fallback: std::result::Result<String, u16>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubTransport {
    /// A transport that always answers with `body`.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_fallback(Ok(body.into()))
    }

    /// A transport that always fails with `status`.
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self::with_fallback(Err(status))
    }

    fn with_fallback(fallback: std::result::Result<String, u16>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues `count` failures with `status` ahead of the fallback.
    #[must_use]
    pub fn then_fail(self, count: usize, status: u16) -> Self {
        self.script.lock().extend(std::iter::repeat(Err(status)).take(count));
        self
    }

    /// Number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Every recorded call.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// The most recent call.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str, params: &[(String, String)]) -> Result<String> {
        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            params: params.to_vec(),
        });

        let next = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        next.map_err(SearchError::Status)
    }
}

/// A sleeper that records requested durations instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Creates a new recording sleeper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every requested duration, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }

    /// Sum of all requested durations.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.sleeps.lock().iter().sum()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_transport_replays_script_then_fallback() {
        let transport = StubTransport::ok("done").then_fail(2, 502);
        let params = vec![("wd".to_string(), "q".to_string())];

        assert!(matches!(
            transport.get("https://a", &params),
            Err(SearchError::Status(502))
        ));
        assert!(transport.get("https://a", &params).is_err());
        assert_eq!(transport.get("https://a", &params).ok(), Some("done".to_string()));
        assert_eq!(transport.call_count(), 3);
        assert_eq!(
            transport.last_request().and_then(|r| r.param("wd").map(String::from)),
            Some("q".to_string())
        );
    }

    #[test]
    fn test_recording_sleeper() {
        let sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::from_millis(10));
        sleeper.sleep(Duration::from_millis(20));

        assert_eq!(
            sleeper.sleeps(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
        assert_eq!(sleeper.total(), Duration::from_millis(30));
    }
}
