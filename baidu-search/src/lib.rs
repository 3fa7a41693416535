//! # Baidu Search
//!
//! A blocking client for Baidu web, news, video, and image search that turns
//! result pages into normalized [`SearchResult`] records.
//!
//! The pipeline is deliberately small:
//!
//! - **Fetching**: one HTTP GET per attempt through a reusable session, with
//!   linear-backoff retries
//! - **Extraction**: loose, table-driven matching over the result markup;
//!   malformed hits are skipped individually
//! - **Soft failure**: every search operation returns a list; failures are
//!   logged, never raised
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use baidu_search::prelude::*;
//!
//! let client = BaiduSearch::new(SearchConfig::default())?;
//! for result in client.web_search("rust tutorial", 5, 1) {
//!     println!("{} - {}", result.title, result.url);
//! }
//! # Ok::<(), baidu_search::errors::SearchError>(())
//! ```
//!
//! Image search is partial: the embedded result payload is located but not
//! decoded, so [`BaiduSearch::image_search`] always returns an empty list.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod client;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod observability;
pub mod retry;
pub mod testing;
pub mod transport;

pub use client::BaiduSearch;
pub use models::{SearchRequest, SearchResult, SearchType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::BaiduSearch;
    pub use crate::config::{
        ClassRuleConfig, ExtractionConfig, FetchConfig, RetryConfig, SearchConfig,
    };
    pub use crate::errors::SearchError;
    pub use crate::extractor::{ContainerOutcome, ImagePayload, ResultExtractor, SkipReason};
    pub use crate::models::{SearchRequest, SearchResult, SearchType};
    pub use crate::retry::{Sleeper, ThreadSleeper};
    pub use crate::transport::{HttpTransport, Transport};
}

/// Runs a web search with default settings.
///
/// Builds a fresh client per call. Returns an empty list if the client
/// cannot be built or the search fails.
pub fn search(query: &str, num: usize) -> Vec<SearchResult> {
    match BaiduSearch::new(config::SearchConfig::default()) {
        Ok(client) => client.web_search(query, num, 1),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build search client");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_rejects_blank_query_without_network() {
        assert!(search("   ", 10).is_empty());
    }
}
