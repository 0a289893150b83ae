//! JSON-LD offer price extraction
//!
//! Reads `<script type="application/ld+json">` blocks. Two block shapes are
//! understood: a product-like object carrying `offers` directly, and a
//! wrapper whose `@graph` array holds a `Product` entry. A block carrying both
//! falls back to its `@graph` when the top-level offers have no price. Any
//! other shape, or a block that is not valid JSON, is a miss and scanning
//! moves on.

use scraper::{Html, Selector};
use serde_json::{Map, Value};

/// The block shapes the price lookup understands
#[derive(Debug, Clone, Copy)]
pub enum StructuredData<'a> {
    /// Object with `offers` at top level
    Direct(&'a Map<String, Value>),
    /// Object with an `@graph` array of typed entries
    Graph(&'a [Value]),
}

impl<'a> StructuredData<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        if obj.contains_key("offers") {
            return Some(StructuredData::Direct(obj));
        }
        match obj.get("@graph") {
            Some(Value::Array(items)) => Some(StructuredData::Graph(items)),
            _ => None,
        }
    }

    /// `"{price} {currency}"` from the offer this shape points at
    pub fn offer_price(&self, default_currency: &str) -> Option<String> {
        match self {
            StructuredData::Direct(obj) => price_from_offers(obj, default_currency)
                .or_else(|| match obj.get("@graph") {
                    Some(Value::Array(items)) => {
                        StructuredData::Graph(items).offer_price(default_currency)
                    }
                    _ => None,
                }),
            StructuredData::Graph(items) => items
                .iter()
                .filter_map(Value::as_object)
                .find(|item| is_product(item))
                .and_then(|product| price_from_offers(product, default_currency)),
        }
    }
}

/// Raw text of every JSON-LD block in document order
pub fn jsonld_blocks(document: &Html) -> Vec<String> {
    let selector = match Selector::parse(r#"script[type="application/ld+json"]"#) {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// First offer price found across all JSON-LD blocks
///
/// Blocks are scanned in document order and the earliest priced one wins,
/// like every other field waterfall.
pub fn extract_offer_price(document: &Html, default_currency: &str) -> Option<String> {
    for (index, block) in jsonld_blocks(document).iter().enumerate() {
        let json = match serde_json::from_str::<Value>(block.trim()) {
            Ok(json) => json,
            Err(err) => {
                tracing::trace!(block = index, error = %err, "skipping malformed JSON-LD block");
                continue;
            }
        };

        if let Some(price) =
            StructuredData::from_value(&json).and_then(|data| data.offer_price(default_currency))
        {
            return Some(price);
        }
    }
    None
}

fn is_product(obj: &Map<String, Value>) -> bool {
    match obj.get("@type") {
        Some(Value::String(t)) => t == "Product",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("Product")),
        _ => false,
    }
}

fn price_from_offers(obj: &Map<String, Value>, default_currency: &str) -> Option<String> {
    match obj.get("offers")? {
        Value::Object(offer) => price_from_offer(offer, default_currency),
        Value::Array(offers) => offers
            .iter()
            .filter_map(Value::as_object)
            .find_map(|offer| price_from_offer(offer, default_currency)),
        _ => None,
    }
}

fn price_from_offer(offer: &Map<String, Value>, default_currency: &str) -> Option<String> {
    let amount = match offer.get("price")? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if amount.is_empty() {
        return None;
    }

    let currency = offer
        .get("priceCurrency")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(default_currency);

    Some(format!("{} {}", amount, currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_of(html: &str) -> Option<String> {
        extract_offer_price(&Html::parse_document(html), "SEK")
    }

    #[test]
    fn test_direct_offer() {
        let html = r#"
        <html>
        <head>
            <script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@type": "Product",
                "name": "Test Product",
                "offers": {
                    "@type": "Offer",
                    "price": "19.99",
                    "priceCurrency": "EUR"
                }
            }
            </script>
        </head>
        </html>
        "#;

        assert_eq!(price_of(html).unwrap(), "19.99 EUR");
    }

    #[test]
    fn test_default_currency_and_numeric_price() {
        let html = r#"
        <script type="application/ld+json">
        {"@type": "Product", "offers": {"price": 1299}}
        </script>
        "#;

        assert_eq!(price_of(html).unwrap(), "1299 SEK");
    }

    #[test]
    fn test_graph_product() {
        let html = r#"
        <script type="application/ld+json">
        {
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "Organization", "name": "Org 1"},
                {"@type": "Product", "name": "Product 1",
                 "offers": [{"@type": "Offer", "price": "349.00", "priceCurrency": "SEK"}]}
            ]
        }
        </script>
        "#;

        assert_eq!(price_of(html).unwrap(), "349.00 SEK");
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let html = r#"
        <script type="application/ld+json">{ "@type": "Product", "offers": { </script>
        <script type="application/ld+json">
        {"@type": "Product", "offers": {"price": "89", "priceCurrency": "SEK"}}
        </script>
        "#;

        assert_eq!(price_of(html).unwrap(), "89 SEK");
    }

    #[test]
    fn test_unrecognized_shapes_miss() {
        let html = r#"
        <script type="application/ld+json">{"@type": "BreadcrumbList", "itemListElement": []}</script>
        <script type="application/ld+json">[{"@type": "Product", "offers": {"price": "10"}}]</script>
        <script type="application/ld+json">{"@type": "Product", "offers": {"price": ""}}</script>
        "#;

        assert_eq!(price_of(html), None);
    }

    #[test]
    fn test_first_block_with_price_wins() {
        let html = r#"
        <script type="application/ld+json">{"@type": "Product", "offers": {"price": "100"}}</script>
        <script type="application/ld+json">{"@type": "Product", "offers": {"price": "200"}}</script>
        "#;

        assert_eq!(price_of(html).unwrap(), "100 SEK");
    }

    #[test]
    fn test_unpriced_top_level_offer_falls_back_to_graph() {
        let html = r#"
        <script type="application/ld+json">
        {
            "offers": {"@type": "AggregateOffer"},
            "@graph": [
                {"@type": "Product", "offers": {"price": "799", "priceCurrency": "SEK"}}
            ]
        }
        </script>
        "#;

        assert_eq!(price_of(html).unwrap(), "799 SEK");
    }
}
