//! Price string normalization
//!
//! Heuristic, not a currency parser: strips a "from" prefix and tags bare
//! amounts with the configured currency suffix. Anything else passes through.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::PriceConfig;
use crate::sanitize::collapse_whitespace;

static BARE_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[,.]?\d*$").expect("BARE_AMOUNT_RE should compile"));

/// Turn raw price text into the display string
pub fn normalize(raw: &str, config: &PriceConfig) -> String {
    let mut price = collapse_whitespace(raw);
    if price.is_empty() {
        return config.fallback.clone();
    }

    if let Some(rest) = strip_from_prefix(&price, &config.from_prefixes) {
        price = rest.trim().to_string();
        if price.is_empty() {
            return config.fallback.clone();
        }
    }

    let compact: String = price.chars().filter(|c| !c.is_whitespace()).collect();
    if BARE_AMOUNT_RE.is_match(&compact) && !config.bare_amount_suffix.is_empty() {
        price.push(' ');
        price.push_str(&config.bare_amount_suffix);
    }

    price
}

/// Like [`normalize`] for a candidate that may be missing
pub fn normalize_opt(raw: Option<&str>, config: &PriceConfig) -> String {
    normalize(raw.unwrap_or_default(), config)
}

/// Text after the earliest case-insensitive occurrence of any prefix token
fn strip_from_prefix<'a>(text: &'a str, prefixes: &[String]) -> Option<&'a str> {
    prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .filter_map(|p| find_ignore_case(text, p))
        .min_by_key(|(start, _)| *start)
        .map(|(_, end)| &text[end..])
}

/// Byte range of the first case-insensitive match of `needle`
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let needle_lower = needle.to_lowercase();
    let needle_chars = needle.chars().count();

    for (start, _) in haystack.char_indices() {
        let end = haystack[start..]
            .char_indices()
            .nth(needle_chars)
            .map(|(i, _)| start + i)
            .unwrap_or(haystack.len());
        if haystack[start..end].to_lowercase() == needle_lower {
            return Some((start, end));
        }
        if end == haystack.len() {
            break;
        }
    }
    None
}
