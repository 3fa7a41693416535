//! Best-effort image payload location.
//!
//! Image result pages render from a JSON object embedded in inline script.
//! This module finds and parses that object but does not decode it into
//! records: its field layout is undocumented, so image search stays partial
//! and yields no results.

use regex::Regex;

/// What the image path found in a page.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    /// The call-site pattern is absent.
    Missing,
    /// The pattern matched but the object is not valid JSON.
    Malformed(String),
    /// The embedded object, parsed.
    Located(serde_json::Value),
}

impl ImagePayload {
    /// Whether a payload was parsed.
    #[must_use]
    pub const fn is_located(&self) -> bool {
        matches!(self, Self::Located(_))
    }
}

/// Scans raw page text for the embedded payload.
pub fn locate_payload(pattern: &Regex, html: &str) -> ImagePayload {
    let Some(raw) = pattern
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
    else {
        return ImagePayload::Missing;
    };

    match serde_json::from_str(raw) {
        Ok(value) => ImagePayload::Located(value),
        Err(e) => ImagePayload::Malformed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionConfig;

    fn pattern() -> Regex {
        Regex::new(&ExtractionConfig::default().image_payload_pattern).unwrap()
    }

    #[test]
    fn test_locate_payload_parses_object() {
        let html = r#"<script>window.baidu.sug({"q":"sunset","s":["a","b"]});</script>"#;
        let payload = locate_payload(&pattern(), html);
        assert_eq!(
            payload,
            ImagePayload::Located(serde_json::json!({"q": "sunset", "s": ["a", "b"]}))
        );
        assert!(payload.is_located());
    }

    #[test]
    fn test_locate_payload_missing() {
        let payload = locate_payload(&pattern(), "<html><body>nothing</body></html>");
        assert_eq!(payload, ImagePayload::Missing);
    }

    #[test]
    fn test_locate_payload_malformed() {
        let html = "<script>window.baidu.sug({q: unquoted})</script>";
        assert!(matches!(
            locate_payload(&pattern(), html),
            ImagePayload::Malformed(_)
        ));
    }
}
