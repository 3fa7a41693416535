//! Result-page extraction.
//!
//! The provider's markup is undocumented and changes without notice, so the
//! extractor matches containers and fields through the loose rule table in
//! [`ExtractionConfig`] and treats every container independently: one
//! malformed hit is skipped, the rest of the page still comes through.

mod image;
mod rules;

pub use image::ImagePayload;
pub use rules::{ClassRule, ExtractionRules};

use std::collections::HashSet;

use scraper::{ElementRef, Html};

use crate::config::ExtractionConfig;
use crate::errors::Result;
use crate::models::SearchResult;

/// Why a candidate container produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No heading inside the container.
    MissingHeading,
    /// The heading has no text.
    EmptyTitle,
    /// No link with a non-empty target inside the heading.
    MissingLink,
}

/// Per-container extraction outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerOutcome {
    /// A complete record.
    Extracted(SearchResult),
    /// The container was skipped.
    Skipped(SkipReason),
}

impl ContainerOutcome {
    /// The record, if one was extracted.
    #[must_use]
    pub fn into_result(self) -> Option<SearchResult> {
        match self {
            Self::Extracted(result) => Some(result),
            Self::Skipped(_) => None,
        }
    }
}

/// Turns result-page HTML into [`SearchResult`] records.
#[derive(Debug, Clone)]
pub struct ResultExtractor {
    rules: ExtractionRules,
}

impl ResultExtractor {
    /// Compiles the rule table.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            rules: ExtractionRules::compile(config)?,
        })
    }

    /// Extracts records in document order, dropping skipped containers.
    pub fn extract(&self, html: &str) -> Vec<SearchResult> {
        self.extract_outcomes(html)
            .into_iter()
            .filter_map(ContainerOutcome::into_result)
            .collect()
    }

    /// Extracts one outcome per candidate container, in document order.
    ///
    /// Each title heading yields at most one record: a nested container
    /// whose heading was already claimed by an enclosing one is not a
    /// candidate of its own.
    pub fn extract_outcomes(&self, html: &str) -> Vec<ContainerOutcome> {
        let document = Html::parse_document(html);
        let mut claimed_headings = HashSet::new();

        let outcomes: Vec<ContainerOutcome> = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| self.rules.is_container(element))
            .filter(|container| {
                self.rules
                    .heading_in(*container)
                    .map_or(true, |heading| claimed_headings.insert(heading.id()))
            })
            .enumerate()
            .map(|(index, container)| {
                let outcome = self.extract_container(container);
                if let ContainerOutcome::Skipped(reason) = &outcome {
                    tracing::debug!(index, ?reason, "Skipping result container");
                }
                outcome
            })
            .collect();

        tracing::debug!(
            containers = outcomes.len(),
            extracted = outcomes
                .iter()
                .filter(|o| matches!(o, ContainerOutcome::Extracted(_)))
                .count(),
            "Parsed result page"
        );
        outcomes
    }

    /// Extracts a single container.
    pub fn extract_container(&self, container: ElementRef<'_>) -> ContainerOutcome {
        let Some(heading) = self.rules.heading_in(container) else {
            return ContainerOutcome::Skipped(SkipReason::MissingHeading);
        };

        let title = element_text(heading);
        if title.is_empty() {
            return ContainerOutcome::Skipped(SkipReason::EmptyTitle);
        }

        let href = self
            .rules
            .link_in(heading)
            .and_then(|link| link.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty());
        let Some(href) = href else {
            return ContainerOutcome::Skipped(SkipReason::MissingLink);
        };

        let abstract_text = self
            .rules
            .abstract_in(container)
            .map(element_text)
            .unwrap_or_default();
        let source = self
            .rules
            .source_in(container)
            .map(element_text)
            .unwrap_or_default();

        ContainerOutcome::Extracted(
            SearchResult::new(title, self.rules.absolutize(href), abstract_text).with_source(source),
        )
    }

    /// Classifies the embedded image payload of an image result page.
    pub fn locate_image_payload(&self, html: &str) -> ImagePayload {
        image::locate_payload(self.rules.image_payload(), html)
    }

    /// Image search records.
    ///
    /// Always empty: the payload is located and parsed for diagnostics only.
    pub fn extract_images(&self, html: &str) -> Vec<SearchResult> {
        match self.locate_image_payload(html) {
            ImagePayload::Located(payload) => {
                tracing::info!(
                    kind = json_kind(&payload),
                    "Image payload located; decoding image records is not supported"
                );
            }
            ImagePayload::Malformed(reason) => {
                tracing::warn!(%reason, "Image payload is not valid JSON");
            }
            ImagePayload::Missing => {
                tracing::warn!("Image payload not found in page");
            }
        }
        Vec::new()
    }
}

/// Element text with whitespace runs collapsed and ends trimmed.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassRuleConfig;
    use crate::testing::SerpFixture;
    use pretty_assertions::assert_eq;

    fn extractor() -> ResultExtractor {
        ResultExtractor::new(&ExtractionConfig::default()).unwrap()
    }

    const SINGLE_RESULT: &str = r#"
        <html><body>
          <div id="content_left">
            <div class="result c-container new-pmd" id="1">
              <h3 class="t"><a href="/link?url=abc123">Rust <em>Programming</em>   Language</a></h3>
              <div class="c-abstract">A language empowering everyone.</div>
              <span class="c-color-gray">rust-lang.org</span>
              <span class="cite-source">rust-lang.org</span>
            </div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_extract_single_result() {
        let results = extractor().extract(SINGLE_RESULT);

        assert_eq!(
            results,
            vec![SearchResult::new(
                "Rust Programming Language",
                "https://www.baidu.com/link?url=abc123",
                "A language empowering everyone.",
            )
            .with_source("rust-lang.org")]
        );
        assert_eq!(results[0].timestamp, "");
    }

    #[test]
    fn test_extract_counts_only_well_formed_containers_in_order() {
        let html = SerpFixture::new()
            .result("First", "https://example.com/1", "one")
            .missing_heading()
            .result("Second", "/link?x=2", "two")
            .missing_link("Orphan heading")
            .result("Third", "https://example.com/3", "three")
            .build();

        let outcomes = extractor().extract_outcomes(&html);
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[1], ContainerOutcome::Skipped(SkipReason::MissingHeading));
        assert_eq!(outcomes[3], ContainerOutcome::Skipped(SkipReason::MissingLink));

        let titles: Vec<String> = extractor()
            .extract(&html)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_extract_relative_and_absolute_urls() {
        let html = SerpFixture::new()
            .result("Relative", "/link?x=1", "")
            .result("Absolute", "https://example.com/page", "")
            .build();

        let urls: Vec<String> = extractor()
            .extract(&html)
            .into_iter()
            .map(|r| r.url)
            .collect();
        assert_eq!(
            urls,
            vec!["https://www.baidu.com/link?x=1", "https://example.com/page"]
        );
    }

    #[test]
    fn test_missing_optional_fields_are_empty() {
        let html = r#"<div class="result"><h3><a href="https://a.example">Title</a></h3></div>"#;
        let results = extractor().extract(html);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].abstract_text, "");
        assert_eq!(results[0].source, "");
    }

    #[test]
    fn test_empty_title_and_empty_href_are_skipped() {
        let html = r#"
            <div class="result"><h3><a href="https://a.example">   </a></h3></div>
            <div class="result"><h3><a href="">Blank link</a></h3></div>
        "#;
        let outcomes = extractor().extract_outcomes(html);

        assert_eq!(
            outcomes,
            vec![
                ContainerOutcome::Skipped(SkipReason::EmptyTitle),
                ContainerOutcome::Skipped(SkipReason::MissingLink),
            ]
        );
    }

    #[test]
    fn test_link_must_be_inside_heading() {
        let html = r#"<div class="c-container"><h3>Title</h3><a href="https://a.example">x</a></div>"#;
        assert_eq!(
            extractor().extract_outcomes(html),
            vec![ContainerOutcome::Skipped(SkipReason::MissingLink)]
        );
    }

    #[test]
    fn test_non_matching_containers_are_ignored() {
        let html = r#"
            <div class="header"><h3><a href="https://a.example">Nav</a></h3></div>
            <section class="result"><h3><a href="https://b.example">Not a div</a></h3></section>
        "#;
        assert!(extractor().extract(html).is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = SerpFixture::new()
            .result("One", "/a", "x")
            .missing_heading()
            .result("Two", "/b", "y")
            .build();
        let extractor = extractor();

        assert_eq!(extractor.extract(&html), extractor.extract(&html));
    }

    #[test]
    fn test_custom_container_rule() {
        let config = ExtractionConfig {
            heading_selector: "h2, h3".to_string(),
            ..ExtractionConfig::default()
        }
        .with_container_rule(ClassRuleConfig::new("article", "^hit$"));
        let extractor = ResultExtractor::new(&config).unwrap();
        let html = r#"<article class="hit"><h2><a href="/x">Article hit</a></h2></article>"#;

        let results = extractor.extract(html);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://www.baidu.com/x");
    }

    #[test]
    fn test_title_comes_from_h3_not_earlier_badge() {
        let html = r#"
            <div class="result c-container">
              <h2 class="badge">Sponsored</h2>
              <h3 class="t"><a href="/link?url=r">Real title</a></h3>
            </div>
        "#;

        let results = extractor().extract(html);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Real title");
        assert_eq!(results[0].url, "https://www.baidu.com/link?url=r");
    }

    #[test]
    fn test_nested_containers_yield_one_record() {
        let html = r#"
            <div class="result c-container">
              <div class="c-result-content">
                <h3><a href="/link?url=t">T</a></h3>
                <span class="content-right_1">inner abstract</span>
              </div>
            </div>
            <div class="result"><h3><a href="/link?url=u">U</a></h3></div>
        "#;

        let results = extractor().extract(html);
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["T", "U"]);
        assert_eq!(results[0].abstract_text, "inner abstract");
        assert_eq!(extractor().extract_outcomes(html).len(), 2);
    }

    #[test]
    fn test_matching_wrapper_does_not_swallow_results() {
        let html = r#"
            <div class="results-list">
              <div class="result"><h3><a href="/a">A</a></h3></div>
              <div class="result"><h3><a href="/b">B</a></h3></div>
              <div class="result"><h3><a href="/c">C</a></h3></div>
            </div>
        "#;

        let titles: Vec<String> = extractor()
            .extract(html)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_garbage_input_yields_nothing() {
        assert!(extractor().extract("<<<not html at all").is_empty());
        assert!(extractor().extract("").is_empty());
    }

    #[test]
    fn test_extract_images_is_always_empty() {
        let extractor = extractor();
        let html = r#"<script>window.baidu.sug({"q":"cat"})</script>"#;

        assert!(extractor.locate_image_payload(html).is_located());
        assert!(extractor.extract_images(html).is_empty());
        assert!(extractor.extract_images("<html></html>").is_empty());
    }
}
