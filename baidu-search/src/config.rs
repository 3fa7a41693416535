//! Configuration types for fetching, extraction, and client pacing.
//!
//! Everything is passed at construction time; nothing is read from files or
//! the environment. The structs derive serde so callers that do keep their
//! settings in a file can deserialize them directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Origin used to absolutize path-only result links.
pub const PROVIDER_ORIGIN: &str = "https://www.baidu.com";

/// Largest page size the provider honours.
pub const PROVIDER_MAX_RESULTS: usize = 50;

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// Configuration for HTTP fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-attempt request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Headers sent with every request, on top of the user agent.
    #[serde(default = "default_headers")]
    pub headers: HashMap<String, String>,
    /// Retry configuration.
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_timeout() -> f64 {
    10.0
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

// Accept-Encoding is left to the HTTP client so it can decompress bodies.
fn default_headers() -> HashMap<String, String> {
    [
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
        ("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8"),
        ("Connection", "keep-alive"),
        ("Upgrade-Insecure-Requests", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            headers: default_headers(),
            retry: RetryConfig::default(),
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the retry configuration.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Gets timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        seconds(self.timeout_seconds)
    }

    /// Whether the timeout is a positive, finite number of seconds.
    #[must_use]
    pub fn has_valid_timeout(&self) -> bool {
        self.timeout_seconds.is_finite() && self.timeout_seconds > 0.0
    }
}

/// Retry configuration for failed requests.
///
/// Backoff is linear: the wait before retry `i` (1-based) is
/// `retry_delay_seconds * i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Number of retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// Base delay between retries in seconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_seconds: f64,
}

fn default_max_retries() -> usize {
    3
}

fn default_retry_delay() -> f64 {
    1.0
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_seconds: default_retry_delay(),
        }
    }
}

impl RetryConfig {
    /// Creates a new retry config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the base delay.
    #[must_use]
    pub fn with_retry_delay(mut self, seconds: f64) -> Self {
        self.retry_delay_seconds = seconds;
        self
    }

    /// Total attempts, including the first one.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.max_retries.saturating_add(1)
    }

    /// Calculates the delay before the given retry (1-based).
    #[must_use]
    pub fn delay_for_retry(&self, retry: usize) -> Duration {
        seconds(self.retry_delay_seconds).saturating_mul(u32::try_from(retry).unwrap_or(u32::MAX))
    }
}

/// A class-pattern rule: an element with tag `tag` whose class attribute
/// matches the regex `class_pattern` anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRuleConfig {
    /// Element tag name.
    pub tag: String,
    /// Unanchored regex applied to the raw class attribute.
    pub class_pattern: String,
}

impl ClassRuleConfig {
    /// Creates a new rule.
    #[must_use]
    pub fn new(tag: impl Into<String>, class_pattern: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class_pattern: class_pattern.into(),
        }
    }
}

/// Matching table for result-page extraction.
///
/// Markup drift on the provider side should only ever require edits here.
/// Field rules are ordered: the first rule that finds an element wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Origin prefixed to path-only links.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Rules identifying result containers.
    #[serde(default = "default_container_rules")]
    pub container_rules: Vec<ClassRuleConfig>,
    /// CSS selector for the title heading inside a container.
    #[serde(default = "default_heading_selector")]
    pub heading_selector: String,
    /// CSS selector for the link inside the title heading.
    #[serde(default = "default_link_selector")]
    pub link_selector: String,
    /// Rules for the abstract text.
    #[serde(default = "default_abstract_rules")]
    pub abstract_rules: Vec<ClassRuleConfig>,
    /// Rules for the source/citation text.
    #[serde(default = "default_source_rules")]
    pub source_rules: Vec<ClassRuleConfig>,
    /// Regex locating the embedded image payload; group 1 must capture the
    /// JSON object.
    #[serde(default = "default_image_payload_pattern")]
    pub image_payload_pattern: String,
}

fn default_origin() -> String {
    PROVIDER_ORIGIN.to_string()
}

fn default_container_rules() -> Vec<ClassRuleConfig> {
    vec![ClassRuleConfig::new("div", "result|c-container")]
}

fn default_heading_selector() -> String {
    "h3".to_string()
}

fn default_link_selector() -> String {
    "a[href]".to_string()
}

fn default_abstract_rules() -> Vec<ClassRuleConfig> {
    vec![
        ClassRuleConfig::new("span", "content-right_|abstract"),
        ClassRuleConfig::new("div", "abstract"),
    ]
}

fn default_source_rules() -> Vec<ClassRuleConfig> {
    vec![ClassRuleConfig::new("span", "cite|source")]
}

fn default_image_payload_pattern() -> String {
    r"window\.baidu\.sug\((\{.*?\})\)".to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            container_rules: default_container_rules(),
            heading_selector: default_heading_selector(),
            link_selector: default_link_selector(),
            abstract_rules: default_abstract_rules(),
            source_rules: default_source_rules(),
            image_payload_pattern: default_image_payload_pattern(),
        }
    }
}

impl ExtractionConfig {
    /// Creates a new extraction configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin used for path-only links.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Appends a container rule.
    #[must_use]
    pub fn with_container_rule(mut self, rule: ClassRuleConfig) -> Self {
        self.container_rules.push(rule);
        self
    }

    /// Appends an abstract rule.
    #[must_use]
    pub fn with_abstract_rule(mut self, rule: ClassRuleConfig) -> Self {
        self.abstract_rules.push(rule);
        self
    }

    /// Appends a source rule.
    #[must_use]
    pub fn with_source_rule(mut self, rule: ClassRuleConfig) -> Self {
        self.source_rules.push(rule);
        self
    }
}

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Extraction configuration.
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Pause after every round-trip, in seconds.
    #[serde(default = "default_delay")]
    pub delay_seconds: f64,
    /// Hard cap on results per call.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_delay() -> f64 {
    1.0
}

fn default_max_results() -> usize {
    PROVIDER_MAX_RESULTS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extraction: ExtractionConfig::default(),
            delay_seconds: default_delay(),
            max_results: default_max_results(),
        }
    }
}

impl SearchConfig {
    /// Creates a new search configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.fetch.timeout_seconds = seconds;
        self
    }

    /// Sets the number of retries.
    #[must_use]
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.fetch.retry.max_retries = retries;
        self
    }

    /// Sets the base retry delay.
    #[must_use]
    pub fn with_retry_delay(mut self, seconds: f64) -> Self {
        self.fetch.retry.retry_delay_seconds = seconds;
        self
    }

    /// Sets the pause after every round-trip.
    #[must_use]
    pub fn with_delay(mut self, seconds: f64) -> Self {
        self.delay_seconds = seconds;
        self
    }

    /// Replaces the fetch configuration.
    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Replaces the extraction configuration.
    #[must_use]
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    /// Gets the inter-request delay as Duration.
    #[must_use]
    pub fn delay(&self) -> Duration {
        seconds(self.delay_seconds)
    }
}
