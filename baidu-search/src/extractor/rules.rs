//! Compiled matching rules.

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::config::{ClassRuleConfig, ExtractionConfig};
use crate::errors::{Result, SearchError};

/// An element tag plus an unanchored regex over its class attribute.
#[derive(Debug, Clone)]
pub struct ClassRule {
    tag: String,
    pattern: Regex,
}

impl ClassRule {
    /// Compiles a rule from its configuration.
    pub fn compile(config: &ClassRuleConfig) -> Result<Self> {
        let pattern = Regex::new(&config.class_pattern)
            .map_err(|e| SearchError::InvalidRule(format!("{}: {e}", config.class_pattern)))?;
        Ok(Self {
            tag: config.tag.to_ascii_lowercase(),
            pattern,
        })
    }

    /// Whether `element` satisfies the rule.
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        value.name() == self.tag
            && value
                .attr("class")
                .is_some_and(|class| self.pattern.is_match(class))
    }

    /// First descendant of `scope` (excluding `scope` itself) that
    /// satisfies the rule, in document order.
    pub fn first_in<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|element| self.matches(element))
    }
}

/// The compiled form of [`ExtractionConfig`].
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    origin: String,
    containers: Vec<ClassRule>,
    heading: Selector,
    link: Selector,
    abstract_rules: Vec<ClassRule>,
    source_rules: Vec<ClassRule>,
    image_payload: Regex,
}

impl ExtractionRules {
    /// Compiles every rule in the table.
    pub fn compile(config: &ExtractionConfig) -> Result<Self> {
        let image_payload = Regex::new(&config.image_payload_pattern).map_err(|e| {
            SearchError::InvalidRule(format!("{}: {e}", config.image_payload_pattern))
        })?;
        if image_payload.captures_len() < 2 {
            return Err(SearchError::InvalidRule(format!(
                "{}: missing capture group",
                config.image_payload_pattern
            )));
        }

        Ok(Self {
            origin: config.origin.trim_end_matches('/').to_string(),
            containers: compile_all(&config.container_rules)?,
            heading: parse_selector(&config.heading_selector)?,
            link: parse_selector(&config.link_selector)?,
            abstract_rules: compile_all(&config.abstract_rules)?,
            source_rules: compile_all(&config.source_rules)?,
            image_payload,
        })
    }

    /// Whether `element` is a result container.
    pub fn is_container(&self, element: &ElementRef<'_>) -> bool {
        self.containers.iter().any(|rule| rule.matches(element))
    }

    /// Title heading inside a container.
    pub fn heading_in<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        container.select(&self.heading).next()
    }

    /// Link inside a title heading.
    pub fn link_in<'a>(&self, heading: ElementRef<'a>) -> Option<ElementRef<'a>> {
        heading.select(&self.link).next()
    }

    /// Abstract element inside a container.
    pub fn abstract_in<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        first_match(&self.abstract_rules, container)
    }

    /// Source element inside a container.
    pub fn source_in<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        first_match(&self.source_rules, container)
    }

    /// Regex locating the embedded image payload.
    pub const fn image_payload(&self) -> &Regex {
        &self.image_payload
    }

    /// Rewrites path-only links onto the provider origin.
    ///
    /// Protocol-relative links (`//host/path`) get an `https:` scheme; every
    /// other form is returned unchanged.
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with("//") {
            format!("https:{href}")
        } else if href.starts_with('/') {
            format!("{}{href}", self.origin)
        } else {
            href.to_string()
        }
    }
}

fn compile_all(configs: &[ClassRuleConfig]) -> Result<Vec<ClassRule>> {
    configs.iter().map(ClassRule::compile).collect()
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SearchError::InvalidRule(format!("{selector}: {e}")))
}

// Rules are tried in order; the first one that finds anything wins.
fn first_match<'a>(rules: &[ClassRule], scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
    rules.iter().find_map(|rule| rule.first_in(scope))
}
