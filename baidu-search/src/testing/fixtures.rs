//! Synthetic result pages.

use std::fmt::Write;

/// Builds a result page shaped like the provider's markup.
///
/// Containers are emitted flat, in the order they are added.
#[derive(Debug, Clone, Default)]
pub struct SerpFixture {
    containers: Vec<String>,
}

impl SerpFixture {
    /// Creates an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a well-formed result.
    #[must_use]
    pub fn result(self, title: &str, href: &str, abstract_text: &str) -> Self {
        self.result_with_source(title, href, abstract_text, "")
    }

    /// Adds a well-formed result with a source line.
    #[must_use]
    pub fn result_with_source(
        mut self,
        title: &str,
        href: &str,
        abstract_text: &str,
        source: &str,
    ) -> Self {
        let mut html = String::new();
        let _ = write!(
            html,
            r#"<div class="result c-container new-pmd"><h3 class="t"><a href="{href}">{title}</a></h3>"#
        );
        if !abstract_text.is_empty() {
            let _ = write!(
                html,
                r#"<span class="content-right_8Zs40">{abstract_text}</span>"#
            );
        }
        if !source.is_empty() {
            let _ = write!(html, r#"<span class="c-color-gray source">{source}</span>"#);
        }
        html.push_str("</div>");
        self.containers.push(html);
        self
    }

    /// Adds a container with no heading.
    #[must_use]
    pub fn missing_heading(mut self) -> Self {
        self.containers.push(
            r#"<div class="result c-container"><span class="content-right_8Zs40">no heading</span></div>"#
                .to_string(),
        );
        self
    }

    /// Adds a container whose heading has no link.
    #[must_use]
    pub fn missing_link(mut self, title: &str) -> Self {
        self.containers.push(format!(
            r#"<div class="result c-container"><h3 class="t">{title}</h3></div>"#
        ));
        self
    }

    /// Adds `count` well-formed results titled `Result 1..=count`.
    #[must_use]
    pub fn results(self, count: usize) -> Self {
        (1..=count).fold(self, |fixture, i| {
            fixture.result(
                &format!("Result {i}"),
                &format!("/link?url={i}"),
                &format!("Abstract {i}"),
            )
        })
    }

    /// Renders the page.
    #[must_use]
    pub fn build(&self) -> String {
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>search</title></head>\
             <body><div id=\"wrapper\"><div id=\"content_left\">{}</div></div></body></html>",
            self.containers.concat()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_renders_containers_in_order() {
        let html = SerpFixture::new()
            .result("A", "/a", "")
            .missing_link("B")
            .build();

        let a = html.find(">A<").unwrap();
        let b = html.find(">B<").unwrap();
        assert!(a < b);
        assert!(html.contains(r#"href="/a""#));
    }

    #[test]
    fn test_fixture_results_helper() {
        let html = SerpFixture::new().results(3).build();
        assert_eq!(html.matches("<h3").count(), 3);
        assert!(html.contains("Result 3"));
    }
}
