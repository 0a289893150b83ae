//! Product metadata extraction for retailer pages
//!
//! Given a product page URL, recovers a normalized title, image, price and
//! description:
//! - Ordered strategy tables per field (OpenGraph, Twitter Card, microdata,
//!   JSON-LD offers with @graph support, CSS heuristics)
//! - Per-retailer selector overrides
//! - Price normalization with configurable locale conventions
//! - Keyword-taxonomy categorization

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod observability;
pub mod overrides;
pub mod price;
pub mod record;
pub mod sanitize;

pub use classify::{classify, CategoryRule, CategoryTaxonomy, DomainFallback};
pub use config::{EngineConfig, FetchConfig, PlaceholderConfig, PriceConfig, TextLimits};
pub use engine::Engine;
pub use error::{ConfigError, FetchError};
pub use extractors::{extract, ScrapeResult};
pub use overrides::SiteOverrideRule;
pub use record::ProductRecord;

/// Fetch and extract `url` with the built-in configuration
pub async fn extract_product(url: &str) -> Result<ScrapeResult, FetchError> {
    Engine::new(EngineConfig::default())?.extract_product(url).await
}
