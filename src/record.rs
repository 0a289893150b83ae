//! Shapes handed across the persistence boundary
//!
//! The engine never touches a store. These types describe what callers
//! persist and what they show when a fetch fails.

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, PlaceholderConfig, PriceConfig};
use crate::extractors::ScrapeResult;

/// Wishlist entry as stored by the document-store collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub url: String,
    pub title: String,
    pub image: String,
    pub price: String,
    pub description: String,
    pub quantity: u32,
    pub claimed: bool,
    pub claimed_by: Option<String>,
}

impl ProductRecord {
    /// Unclaimed record for a scraped product. Missing or zero quantity
    /// becomes 1.
    pub fn new(result: ScrapeResult, quantity: Option<u32>) -> Self {
        Self {
            url: result.url,
            title: result.title,
            image: result.image,
            price: result.price,
            description: result.description,
            quantity: quantity.filter(|q| *q > 0).unwrap_or(1),
            claimed: false,
            claimed_by: None,
        }
    }
}

impl ScrapeResult {
    /// Placeholder object a caller shows when fetching `url` failed
    pub fn unavailable(url: &str, placeholders: &PlaceholderConfig, price: &PriceConfig) -> Self {
        Self {
            url: url.to_string(),
            title: placeholders.unavailable_title.clone(),
            image: placeholders.unavailable_image.clone(),
            price: price.fallback.clone(),
            description: String::new(),
        }
    }

    /// [`ScrapeResult::unavailable`] using an engine configuration
    pub fn unavailable_with(url: &str, config: &EngineConfig) -> Self {
        Self::unavailable(url, &config.placeholders, &config.price)
    }
}
