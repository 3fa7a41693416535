//! The network seam.
//!
//! [`Transport`] performs exactly one GET per call and reports failures as
//! [`SearchError`]; retrying is the fetcher's job. [`HttpTransport`] holds a
//! blocking `reqwest` client whose connection pool and default headers are
//! reused across calls.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

#[cfg(test)]
use mockall::automock;

use crate::config::FetchConfig;
use crate::errors::{Result, SearchError};

/// Protocol for a single HTTP GET.
#[cfg_attr(test, automock)]
pub trait Transport {
    /// Sends a GET to `url` with `params` as the query string and returns the
    /// body decoded as UTF-8.
    fn get(&self, url: &str, params: &[(String, String)]) -> Result<String>;
}

/// Transport over a reusable blocking HTTP session.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the session from the fetch configuration.
    ///
    /// The timeout must be a positive, finite number of seconds.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        if !config.has_valid_timeout() {
            return Err(SearchError::InvalidConfig(format!(
                "timeout must be positive, got {}",
                config.timeout_seconds
            )));
        }
        let client = Client::builder()
            .default_headers(build_headers(config)?)
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client })
    }
}

fn build_headers(config: &FetchConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(config.headers.len() + 1);
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .map_err(|e| SearchError::InvalidHeader(format!("User-Agent: {e}")))?,
    );
    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SearchError::InvalidHeader(format!("{name}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| SearchError::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, params: &[(String, String)]) -> Result<String> {
        tracing::debug!(url, ?params, "Sending request");
        let response = self.client.get(url).query(params).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        // Decode as UTF-8 whatever the declared charset says.
        let body = response.bytes()?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
