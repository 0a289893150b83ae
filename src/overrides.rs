//! Per-retailer selector overrides
//!
//! A declarative table of `(host pattern, selectors)` rules. The first rule
//! whose pattern occurs in the page's hostname applies; its selectors are
//! tried in order per field and a non-blank hit replaces the generic value.

use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::extractors::SelectorSpec;

/// Selector overrides for one retailer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOverrideRule {
    /// Matched as a substring of the lowercased hostname
    pub host_contains: String,
    #[serde(default)]
    pub title: Vec<SelectorSpec>,
    #[serde(default)]
    pub price: Vec<SelectorSpec>,
    #[serde(default)]
    pub image: Vec<SelectorSpec>,
}

/// Values an override rule found; `None` leaves the generic result alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideValues {
    pub title: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl SiteOverrideRule {
    pub fn matches_host(&self, host: &str) -> bool {
        !self.host_contains.is_empty()
            && host.to_lowercase().contains(&self.host_contains.to_lowercase())
    }

    pub fn apply(&self, document: &Html) -> OverrideValues {
        OverrideValues {
            title: first_hit(&self.title, document),
            price: first_hit(&self.price, document),
            image: first_hit(&self.image, document),
        }
    }
}

fn first_hit(selectors: &[SelectorSpec], document: &Html) -> Option<String> {
    selectors.iter().find_map(|spec| spec.select_first(document))
}

/// First rule matching the URL's host, if any
pub fn find_rule<'a>(rules: &'a [SiteOverrideRule], url: &str) -> Option<&'a SiteOverrideRule> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    rules.iter().find(|rule| rule.matches_host(host))
}

fn rule(host: &str, title: &[&str], price: &[&str], image: &[&str]) -> SiteOverrideRule {
    let specs = |list: &[&str]| -> Vec<SelectorSpec> {
        list.iter().map(|s| SelectorSpec::parse(s)).collect()
    };
    SiteOverrideRule {
        host_contains: host.to_string(),
        title: specs(title),
        price: specs(price),
        image: specs(image),
    }
}

/// Rules for the Swedish retailers whose pages defeat the generic waterfall
pub fn builtin_rules() -> Vec<SiteOverrideRule> {
    vec![
        rule(
            "webhallen.com",
            &["h1.product-name", "h1"],
            &[".product-price-now", ".product-price"],
            &[".product-image img::attr(src)"],
        ),
        rule(
            "inet.se",
            &[r#"h1[data-testid="product-name"]"#, "h1"],
            &[r#"[data-testid="product-price"]"#, ".price"],
            &[],
        ),
        rule(
            "komplett.se",
            &["h1.product-title", "h1"],
            &[".product-price-now"],
            &[],
        ),
        rule(
            "elgiganten.se",
            &["h1.product-title", "h1"],
            &[".price"],
            &[],
        ),
        rule(
            "amazon.",
            &["#productTitle"],
            &["#priceblock_ourprice", ".a-price .a-offscreen"],
            &[],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_rule_by_host() {
        let rules = builtin_rules();

        let rule = find_rule(&rules, "https://www.Webhallen.com/se/product/123").unwrap();
        assert_eq!(rule.host_contains, "webhallen.com");

        let rule = find_rule(&rules, "https://www.amazon.se/dp/B0C").unwrap();
        assert_eq!(rule.host_contains, "amazon.");

        assert!(find_rule(&rules, "https://shop.example/p/1").is_none());
        assert!(find_rule(&rules, "not a url").is_none());
    }

    #[test]
    fn test_path_mentions_do_not_match() {
        let rules = builtin_rules();
        assert!(find_rule(&rules, "https://blog.example/reviews/inet.se-vs-komplett.se").is_none());
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = vec![
            rule("shop.example", &["h1.first"], &[], &[]),
            rule("example", &["h1.second"], &[], &[]),
        ];
        let rule = find_rule(&rules, "https://shop.example/x").unwrap();
        assert_eq!(rule.title[0].selector, "h1.first");
    }

    #[test]
    fn test_apply_reports_only_hits() {
        let html = r#"
        <div class="product-image"><img src="/images/ps5.jpg"></div>
        <h1 class="product-name">PlayStation 5</h1>
        <span class="product-price-now"> </span>
        <span class="product-price">5 990:-</span>
        "#;
        let document = Html::parse_document(html);
        let rules = builtin_rules();
        let values = find_rule(&rules, "https://www.webhallen.com/se/product/1")
            .unwrap()
            .apply(&document);

        assert_eq!(values.title.as_deref(), Some("PlayStation 5"));
        assert_eq!(values.price.as_deref(), Some("5 990:-"));
        assert_eq!(values.image.as_deref(), Some("/images/ps5.jpg"));

        let values = rule("x", &["h2"], &[], &[]).apply(&document);
        assert_eq!(values, OverrideValues::default());
    }
}
