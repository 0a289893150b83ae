//! Engine configuration
//!
//! Everything the engine treats as a constant lives here: request signature,
//! placeholder values, length caps, price conventions, the site override
//! table and the category taxonomy. The value is built once at startup and
//! shared read-only. Every struct is `#[serde(default)]`, so a JSON file only
//! needs the keys it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classify::CategoryTaxonomy;
use crate::error::ConfigError;
use crate::overrides::{builtin_rules, SiteOverrideRule};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "sv-SE,sv;q=0.9,en;q=0.8";

/// Top-level configuration passed to [`Engine::new`](crate::engine::Engine::new)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fetch: FetchConfig,
    pub placeholders: PlaceholderConfig,
    pub limits: TextLimits,
    pub price: PriceConfig,
    /// Evaluated in order; first rule whose host pattern matches wins
    pub site_overrides: Vec<SiteOverrideRule>,
    pub taxonomy: CategoryTaxonomy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            placeholders: PlaceholderConfig::default(),
            limits: TextLimits::default(),
            price: PriceConfig::default(),
            site_overrides: builtin_rules(),
            taxonomy: CategoryTaxonomy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document, filling in defaults for missing keys
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

/// Request signature and limits for the page fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout, body included
    pub timeout_ms: u64,
    pub max_redirects: usize,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            max_redirects: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

/// Literal defaults used when a field's waterfall misses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    pub title: String,
    pub image: String,
    /// Title of the caller-side object shown when a fetch fails
    pub unavailable_title: String,
    /// Image of the caller-side object shown when a fetch fails
    pub unavailable_image: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            title: "Produkttitel".to_string(),
            image: "https://via.placeholder.com/400x400".to_string(),
            unavailable_title: "Kunde inte hämta produkttitel".to_string(),
            unavailable_image: "https://via.placeholder.com/400x400?text=Bild+saknas".to_string(),
        }
    }
}

/// Character caps applied by the text sanitizer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLimits {
    pub title_max: usize,
    pub description_max: usize,
}

impl Default for TextLimits {
    fn default() -> Self {
        Self {
            title_max: 200,
            description_max: 300,
        }
    }
}

/// Locale conventions for the price normalizer and structured-data prices
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    /// Currency appended to structured-data and meta prices without one
    pub default_currency: String,
    /// "from" tokens; text up to and including the first one is dropped
    pub from_prefixes: Vec<String>,
    /// Suffix appended to bare amounts such as `1299`
    pub bare_amount_suffix: String,
    /// Returned when no usable price text exists
    pub fallback: String,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            default_currency: "SEK".to_string(),
            from_prefixes: vec!["från".to_string()],
            bare_amount_suffix: "kr".to_string(),
            fallback: "Se länk för pris".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{
                "fetch": { "timeout_ms": 2500 },
                "price": { "default_currency": "EUR", "bare_amount_suffix": "€" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.fetch.timeout(), Duration::from_millis(2500));
        assert_eq!(config.fetch.max_redirects, 5);
        assert_eq!(config.fetch.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.price.default_currency, "EUR");
        assert_eq!(config.price.from_prefixes, vec!["från".to_string()]);
        assert_eq!(config.limits.title_max, 200);
        assert!(!config.site_overrides.is_empty());
        assert!(!config.taxonomy.categories.is_empty());
    }

    #[test]
    fn test_empty_override_table_from_json() {
        let config = EngineConfig::from_json_str(r#"{ "site_overrides": [] }"#).unwrap();
        assert!(config.site_overrides.is_empty());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
