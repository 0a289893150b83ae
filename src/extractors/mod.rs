//! Product metadata extraction
//!
//! Each field is resolved by an ordered table of named strategies. The
//! first strategy returning a non-blank value wins; when all of them miss
//! the field gets its configured default. Site overrides run after the
//! generic tables, then text is sanitized and the price normalized.
//!
//! Extraction never fails: malformed markup and malformed structured data
//! degrade to misses.

mod css_extractor;
mod jsonld_extractor;
mod microdata_extractor;
mod opengraph_extractor;

pub use css_extractor::*;
pub use jsonld_extractor::*;
pub use microdata_extractor::*;
pub use opengraph_extractor::*;

use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::EngineConfig;
use crate::overrides::find_rule;
use crate::price;
use crate::sanitize::{clean, clean_opt};

/// Normalized product metadata for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub url: String,
    pub title: String,
    /// Absolute URL
    pub image: String,
    pub price: String,
    pub description: String,
}

/// A parsed page plus the configuration strategies may consult
pub struct Page<'a> {
    pub document: &'a Html,
    pub config: &'a EngineConfig,
}

pub type StrategyFn = fn(&Page<'_>) -> Option<String>;

/// A named rule locating one field's raw value
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: StrategyFn,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Strategy").field(&self.name).finish()
    }
}

/// Raw value for a field and the strategy that produced it.
///
/// For the price field this is the price candidate handed to the
/// normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub strategy: &'static str,
    pub value: String,
}

/// Strategy name reported for values supplied by a site override
pub const SITE_OVERRIDE: &str = "site override";

pub const TITLE_STRATEGIES: &[Strategy] = &[
    Strategy { name: "og:title", run: og_title },
    Strategy { name: "twitter:title", run: twitter_title },
    Strategy { name: "first h1", run: first_h1 },
    Strategy { name: "document title", run: document_title },
];

pub const IMAGE_STRATEGIES: &[Strategy] = &[
    Strategy { name: "og:image", run: og_image },
    Strategy { name: "twitter:image", run: twitter_image },
    Strategy { name: "microdata image", run: microdata_image },
    Strategy { name: "first img", run: first_img },
];

pub const DESCRIPTION_STRATEGIES: &[Strategy] = &[
    Strategy { name: "og:description", run: og_description },
    Strategy { name: "meta description", run: meta_description },
    Strategy { name: "first paragraph", run: first_paragraph },
];

/// Most trustworthy signal first: structured data, then free-text heuristics
pub const PRICE_STRATEGIES: &[Strategy] = &[
    Strategy { name: "structured-data offer", run: structured_data_price },
    Strategy { name: "microdata price", run: microdata_price },
    Strategy { name: "meta price", run: meta_price },
    Strategy { name: "css heuristic", run: css_price },
];

/// Run strategies in order and keep the first non-blank value
pub fn first_present(strategies: &[Strategy], page: &Page<'_>) -> Option<Candidate> {
    strategies.iter().find_map(|strategy| {
        (strategy.run)(page)
            .filter(|value| !value.trim().is_empty())
            .map(|value| Candidate {
                strategy: strategy.name,
                value,
            })
    })
}

/// Extract product metadata from already-fetched markup
pub fn extract(url: &str, html: &str, config: &EngineConfig) -> ScrapeResult {
    let document = Html::parse_document(html);
    let page = Page {
        document: &document,
        config,
    };

    let mut title = first_present(TITLE_STRATEGIES, &page);
    let mut image = first_present(IMAGE_STRATEGIES, &page);
    let mut price = first_present(PRICE_STRATEGIES, &page);
    let description = first_present(DESCRIPTION_STRATEGIES, &page);

    if let Some(rule) = find_rule(&config.site_overrides, url) {
        let found = rule.apply(&document);
        debug!(url, rule = %rule.host_contains, "applying site override");
        let as_override = |value| Candidate {
            strategy: SITE_OVERRIDE,
            value,
        };
        if let Some(value) = found.title {
            title = Some(as_override(value));
        }
        if let Some(value) = found.price {
            price = Some(as_override(value));
        }
        if let Some(value) = found.image {
            image = Some(as_override(value));
        }
    }

    for (field, candidate) in [
        ("title", &title),
        ("image", &image),
        ("price", &price),
        ("description", &description),
    ] {
        debug!(
            url,
            field,
            strategy = candidate.as_ref().map(|c| c.strategy).unwrap_or("default"),
            "field resolved"
        );
    }

    let limits = config.limits;
    let title = title
        .map(|c| c.value)
        .unwrap_or_else(|| config.placeholders.title.clone());
    let image = image
        .map(|c| c.value)
        .unwrap_or_else(|| config.placeholders.image.clone());

    ScrapeResult {
        url: url.to_string(),
        title: clean(&title, limits.title_max),
        image: resolve_image_url(url, &image),
        price: price::normalize_opt(price.as_ref().map(|c| c.value.as_str()), &config.price),
        description: clean_opt(
            description.as_ref().map(|c| c.value.as_str()),
            limits.description_max,
        ),
    }
}

/// Make an image reference absolute against the page's origin.
///
/// Values that already parse as absolute URLs are returned unchanged. If the
/// page URL itself is unusable the value is returned as is.
pub fn resolve_image_url(page_url: &str, image: &str) -> String {
    let image = image.trim();
    if Url::parse(image).is_ok() {
        return image.to_string();
    }

    let Ok(page) = Url::parse(page_url) else {
        return image.to_string();
    };
    let origin = page.origin();
    let base = if origin.is_tuple() {
        Url::parse(&format!("{}/", origin.ascii_serialization())).unwrap_or(page)
    } else {
        page
    };

    base.join(image)
        .map(|absolute| absolute.to_string())
        .unwrap_or_else(|_| image.to_string())
}

fn og_title(page: &Page<'_>) -> Option<String> {
    meta_content(page.document, "og:title")
}

fn twitter_title(page: &Page<'_>) -> Option<String> {
    meta_content(page.document, "twitter:title")
}

fn first_h1(page: &Page<'_>) -> Option<String> {
    first_text(page.document, "h1")
}

fn document_title(page: &Page<'_>) -> Option<String> {
    first_text(page.document, "title")
}

fn og_image(page: &Page<'_>) -> Option<String> {
    meta_content(page.document, "og:image")
}

fn twitter_image(page: &Page<'_>) -> Option<String> {
    meta_content(page.document, "twitter:image")
}

fn microdata_image(page: &Page<'_>) -> Option<String> {
    itemprop_image_src(page.document)
}

fn first_img(page: &Page<'_>) -> Option<String> {
    first_attr(page.document, "img", "src")
}

fn og_description(page: &Page<'_>) -> Option<String> {
    meta_content(page.document, "og:description")
}

fn meta_description(page: &Page<'_>) -> Option<String> {
    meta_content(page.document, "description")
}

fn first_paragraph(page: &Page<'_>) -> Option<String> {
    first_text(page.document, "p")
}

fn structured_data_price(page: &Page<'_>) -> Option<String> {
    extract_offer_price(page.document, &page.config.price.default_currency)
}

fn microdata_price(page: &Page<'_>) -> Option<String> {
    itemprop_value(page.document, "price")
}

fn meta_price(page: &Page<'_>) -> Option<String> {
    let amount = meta_content(page.document, "product:price:amount")?;
    let currency = meta_content(page.document, "product:price:currency")
        .unwrap_or_else(|| page.config.price.default_currency.clone());
    Some(format!("{} {}", amount, currency))
}

fn css_price(page: &Page<'_>) -> Option<String> {
    first_text(page.document, ".price")
        .or_else(|| first_text_by_class_contains(page.document, "price"))
        .or_else(|| first_text(page.document, "#price"))
}
