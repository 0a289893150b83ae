//! CSS selector-based extraction
//!
//! Uses the scraper crate to select elements by CSS selectors. Selectors may
//! carry a `::text` or `::attr(name)` suffix naming what to read from the
//! first match.

use std::fmt;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// What to read from a matched element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    Text,
    Attr(String),
}

/// A CSS selector plus accessor, written as `h1.title`, `h1::text` or
/// `.gallery img::attr(src)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SelectorSpec {
    pub selector: String,
    pub accessor: Accessor,
}

impl SelectorSpec {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Some(pos) = input.rfind("::text") {
            return Self {
                selector: input[..pos].trim().to_string(),
                accessor: Accessor::Text,
            };
        }
        if let Some(pos) = input.rfind("::attr(") {
            let attr_start = pos + "::attr(".len();
            if let Some(attr_end) = input[attr_start..].find(')') {
                return Self {
                    selector: input[..pos].trim().to_string(),
                    accessor: Accessor::Attr(input[attr_start..attr_start + attr_end].trim().to_string()),
                };
            }
        }
        Self {
            selector: input.to_string(),
            accessor: Accessor::Text,
        }
    }

    /// First match's value, or `None` when nothing matches or it is blank
    pub fn select_first(&self, document: &Html) -> Option<String> {
        match &self.accessor {
            Accessor::Text => first_text(document, &self.selector),
            Accessor::Attr(name) => first_attr(document, &self.selector, name),
        }
    }
}

impl From<String> for SelectorSpec {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for SelectorSpec {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<SelectorSpec> for String {
    fn from(spec: SelectorSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for SelectorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.accessor {
            Accessor::Text => write!(f, "{}", self.selector),
            Accessor::Attr(name) => write!(f, "{}::attr({})", self.selector, name),
        }
    }
}

/// Trimmed text content of an element
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first element matching the selector, if non-blank.
///
/// Only the first match is considered; a blank first match is a miss even if
/// later matches have text.
pub fn first_text(document: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;

    document
        .select(&selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}

/// Attribute of the first element matching the selector, if non-blank
pub fn first_attr(document: &Html, selector_str: &str, attr_name: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr_name))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Text of the first element whose `class` attribute contains `token`,
/// compared case-insensitively
pub fn first_text_by_class_contains(document: &Html, token: &str) -> Option<String> {
    let selector = Selector::parse("[class]").ok()?;
    let token = token.to_lowercase();

    document
        .select(&selector)
        .find(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| class.to_lowercase().contains(&token))
        })
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}
