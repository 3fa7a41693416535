//! Data models for search requests and result records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::PROVIDER_MAX_RESULTS;

/// Endpoint shared by web, news, and video search.
pub const WEB_ENDPOINT: &str = "https://www.baidu.com/s";

/// Endpoint for image search.
pub const IMAGE_ENDPOINT: &str = "https://image.baidu.com/search/index";

/// Page size the provider assumes when computing web offsets.
const WEB_PAGE_STRIDE: usize = 10;

/// One normalized search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title, never empty.
    pub title: String,
    /// Absolute result URL.
    pub url: String,
    /// Snippet text; empty when the page had none.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Citation/source text; empty when unknown.
    #[serde(default)]
    pub source: String,
    /// Publication time; the provider markup does not expose one, so this
    /// stays empty.
    #[serde(default)]
    pub timestamp: String,
}

impl SearchResult {
    /// Creates a new result with empty source and timestamp.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        abstract_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            abstract_text: abstract_text.into(),
            ..Default::default()
        }
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Converts to dictionary.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut dict = HashMap::new();
        dict.insert("title".to_string(), serde_json::json!(self.title));
        dict.insert("url".to_string(), serde_json::json!(self.url));
        dict.insert("abstract".to_string(), serde_json::json!(self.abstract_text));
        dict.insert("source".to_string(), serde_json::json!(self.source));
        dict.insert("timestamp".to_string(), serde_json::json!(self.timestamp));
        dict
    }
}

/// Kind of search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Regular web search.
    #[default]
    Web,
    /// Image search. Only partially supported: see [`SearchType::is_fully_supported`].
    Image,
    /// News search.
    News,
    /// Video search.
    Video,
}

impl SearchType {
    /// All search types.
    pub const ALL: [Self; 4] = [Self::Web, Self::Image, Self::News, Self::Video];

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Image => "image",
            Self::News => "news",
            Self::Video => "video",
        }
    }

    /// Endpoint the request is sent to.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Image => IMAGE_ENDPOINT,
            Self::Web | Self::News | Self::Video => WEB_ENDPOINT,
        }
    }

    /// Value of the `tn` selector parameter, if the type needs one.
    #[must_use]
    pub const fn selector(self) -> Option<&'static str> {
        match self {
            Self::Web => None,
            Self::Image => Some("baiduimage"),
            Self::News => Some("news"),
            Self::Video => Some("vid"),
        }
    }

    /// Whether results are decoded into records.
    ///
    /// Image search locates the embedded result payload but does not decode
    /// it, so it always yields an empty list.
    #[must_use]
    pub const fn is_fully_supported(self) -> bool {
        !matches!(self, Self::Image)
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "image" => Ok(Self::Image),
            "news" => Ok(Self::News),
            "video" => Ok(Self::Video),
            other => Err(format!("unknown search type: {other}")),
        }
    }
}

/// A single search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The query text.
    pub query: String,
    /// Requested number of results.
    pub num: usize,
    /// 1-based page number; 0 is treated as 1.
    pub page: usize,
    /// Kind of search.
    pub search_type: SearchType,
}

impl SearchRequest {
    /// Creates a request for the first page of ten results.
    #[must_use]
    pub fn new(search_type: SearchType, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num: 10,
            page: 1,
            search_type,
        }
    }

    /// Sets the requested number of results.
    #[must_use]
    pub fn with_count(mut self, num: usize) -> Self {
        self.num = num;
        self
    }

    /// Sets the page number.
    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Whether the request can be sent at all.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.query.trim().is_empty() && self.num > 0
    }

    /// Result count after applying `max_results` and the provider cap.
    #[must_use]
    pub fn capped_count(&self, max_results: usize) -> usize {
        self.num.min(max_results).min(PROVIDER_MAX_RESULTS)
    }

    /// Endpoint for this request.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        self.search_type.endpoint()
    }

    /// Query parameters in the order they are sent.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let page_index = self.page.saturating_sub(1);
        let (keyword_field, offset, count) = match self.search_type {
            SearchType::Image => ("word", page_index.saturating_mul(self.num), self.num),
            SearchType::Web | SearchType::News | SearchType::Video => (
                "wd",
                page_index.saturating_mul(WEB_PAGE_STRIDE),
                self.capped_count(PROVIDER_MAX_RESULTS),
            ),
        };

        let mut params = Vec::with_capacity(5);
        if let Some(selector) = self.search_type.selector() {
            params.push(("tn".to_string(), selector.to_string()));
        }
        params.push((keyword_field.to_string(), self.query.clone()));
        params.push(("pn".to_string(), offset.to_string()));
        params.push(("rn".to_string(), count.to_string()));
        params.push(("ie".to_string(), "utf-8".to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_web_params() {
        let request = SearchRequest::new(SearchType::Web, "rust tutorial")
            .with_count(20)
            .with_page(3);

        assert_eq!(
            request.params(),
            pairs(&[
                ("wd", "rust tutorial"),
                ("pn", "20"),
                ("rn", "20"),
                ("ie", "utf-8"),
            ])
        );
        assert_eq!(request.endpoint(), WEB_ENDPOINT);
    }

    #[test]
    fn test_count_field_capped_at_provider_max() {
        let request = SearchRequest::new(SearchType::News, "ai").with_count(200);
        let params = request.params();
        assert!(params.contains(&("rn".to_string(), "50".to_string())));
        assert!(params.contains(&("tn".to_string(), "news".to_string())));
    }

    #[test]
    fn test_video_params() {
        let request = SearchRequest::new(SearchType::Video, "cats").with_page(2);
        assert_eq!(
            request.params(),
            pairs(&[
                ("tn", "vid"),
                ("wd", "cats"),
                ("pn", "10"),
                ("rn", "10"),
                ("ie", "utf-8"),
            ])
        );
    }

    #[test]
    fn test_image_params_use_count_as_stride() {
        let request = SearchRequest::new(SearchType::Image, "sunset")
            .with_count(30)
            .with_page(2);

        assert_eq!(
            request.params(),
            pairs(&[
                ("tn", "baiduimage"),
                ("word", "sunset"),
                ("pn", "30"),
                ("rn", "30"),
                ("ie", "utf-8"),
            ])
        );
        assert_eq!(request.endpoint(), IMAGE_ENDPOINT);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let request = SearchRequest::new(SearchType::Web, "q").with_page(0);
        assert!(request.params().contains(&("pn".to_string(), "0".to_string())));
    }

    #[test]
    fn test_request_validity() {
        assert!(SearchRequest::new(SearchType::Web, "q").is_valid());
        assert!(!SearchRequest::new(SearchType::Web, "   \t\n").is_valid());
        assert!(!SearchRequest::new(SearchType::Web, "").is_valid());
        assert!(!SearchRequest::new(SearchType::Web, "q").with_count(0).is_valid());
    }

    #[test]
    fn test_capped_count_never_exceeds_provider_max() {
        let request = SearchRequest::new(SearchType::Web, "q").with_count(100);
        assert_eq!(request.capped_count(100), PROVIDER_MAX_RESULTS);
        assert_eq!(request.capped_count(20), 20);
        assert_eq!(request.with_count(3).capped_count(100), 3);
    }

    #[test]
    fn test_search_type_from_str() {
        assert_eq!("News".parse::<SearchType>(), Ok(SearchType::News));
        assert_eq!(" video ".parse::<SearchType>(), Ok(SearchType::Video));
        assert!("scholar".parse::<SearchType>().is_err());
    }

    #[test]
    fn test_only_image_is_partial() {
        for search_type in SearchType::ALL {
            assert_eq!(search_type.is_fully_supported(), search_type != SearchType::Image);
        }
    }

    #[test]
    fn test_search_result_serializes_abstract_field() {
        let result = SearchResult::new("Title", "https://example.com", "Snippet")
            .with_source("example.com");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["abstract"], "Snippet");
        assert_eq!(json["source"], "example.com");
        assert_eq!(json["timestamp"], "");
    }

    #[test]
    fn test_search_result_to_dict() {
        let dict = SearchResult::new("Title", "https://example.com", "").to_dict();
        assert_eq!(dict.len(), 5);
        assert_eq!(dict.get("title"), Some(&serde_json::json!("Title")));
        assert_eq!(dict.get("abstract"), Some(&serde_json::json!("")));
    }
}
