//! The search client.
//!
//! Every call runs `validate → build params → fetch → extract → truncate →
//! delay`. Failures never reach the caller: a rejected query, an exhausted
//! fetch, or an unreadable page all come back as an empty (or partial)
//! list, with the cause in the logs.

use crate::config::SearchConfig;
use crate::errors::Result;
use crate::extractor::ResultExtractor;
use crate::fetcher::Fetcher;
use crate::models::{SearchRequest, SearchResult, SearchType};
use crate::retry::{Sleeper, ThreadSleeper};
use crate::transport::{HttpTransport, Transport};

/// Blocking Baidu search client.
///
/// Owns one reusable HTTP session. Calls are meant to be made from a single
/// thread; each one blocks for the round-trip, any retry backoff, and the
/// configured inter-request delay.
#[derive(Debug)]
pub struct BaiduSearch<T = HttpTransport, S = ThreadSleeper> {
    config: SearchConfig,
    fetcher: Fetcher<T, S>,
    extractor: ResultExtractor,
}

impl BaiduSearch {
    /// Creates a client with a real HTTP session.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.fetch)?;
        Self::with_transport(config, transport, ThreadSleeper)
    }
}

impl<T: Transport, S: Sleeper> BaiduSearch<T, S> {
    /// Creates a client over the given transport and sleeper.
    pub fn with_transport(config: SearchConfig, transport: T, sleeper: S) -> Result<Self> {
        let extractor = ResultExtractor::new(&config.extraction)?;
        let fetcher = Fetcher::new(transport, sleeper, config.fetch.retry.clone());
        Ok(Self {
            config,
            fetcher,
            extractor,
        })
    }

    /// Web search.
    pub fn web_search(&self, query: &str, num: usize, page: usize) -> Vec<SearchResult> {
        self.search_as(SearchType::Web, query, num, page)
    }

    /// Image search.
    ///
    /// Partial: the request is sent and the embedded payload is located, but
    /// no records are decoded, so the result is always empty.
    pub fn image_search(&self, query: &str, num: usize, page: usize) -> Vec<SearchResult> {
        self.search_as(SearchType::Image, query, num, page)
    }

    /// News search.
    pub fn news_search(&self, query: &str, num: usize, page: usize) -> Vec<SearchResult> {
        self.search_as(SearchType::News, query, num, page)
    }

    /// Video search.
    pub fn video_search(&self, query: &str, num: usize, page: usize) -> Vec<SearchResult> {
        self.search_as(SearchType::Video, query, num, page)
    }

    fn search_as(
        &self,
        search_type: SearchType,
        query: &str,
        num: usize,
        page: usize,
    ) -> Vec<SearchResult> {
        let request = SearchRequest::new(search_type, query)
            .with_count(num)
            .with_page(page);
        self.search(&request)
    }

    /// Runs a search request.
    pub fn search(&self, request: &SearchRequest) -> Vec<SearchResult> {
        let search_type = request.search_type;
        if !request.is_valid() {
            tracing::error!(
                %search_type,
                query = %request.query,
                num = request.num,
                "Search query must not be empty and at least one result must be requested"
            );
            return Vec::new();
        }

        tracing::info!(
            %search_type,
            query = %request.query,
            page = request.page,
            num = request.num,
            "Running search"
        );

        let results = match self.fetcher.fetch(request.endpoint(), &request.params()) {
            Ok(html) => {
                let mut results = match search_type {
                    SearchType::Image => self.extractor.extract_images(&html),
                    SearchType::Web | SearchType::News | SearchType::Video => {
                        self.extractor.extract(&html)
                    }
                };
                results.truncate(request.capped_count(self.config.max_results));
                tracing::info!(%search_type, count = results.len(), "Search finished");
                results
            }
            Err(e) => {
                tracing::error!(%search_type, query = %request.query, error = %e, "Search failed");
                Vec::new()
            }
        };

        self.fetcher.sleeper().sleep(self.config.delay());
        results
    }

    /// The configuration.
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        self.fetcher.transport()
    }

    /// The sleeper used for backoff and pacing.
    pub const fn sleeper(&self) -> &S {
        self.fetcher.sleeper()
    }

    /// The extractor.
    pub const fn extractor(&self) -> &ResultExtractor {
        &self.extractor
    }
}
