//! Microdata (schema.org HTML attributes) lookups
//!
//! Reads single `itemprop` values without building the full item tree.
//! Reference: https://html.spec.whatwg.org/multipage/microdata.html

use scraper::{Html, Selector};

use super::css_extractor::element_text;

/// Value of the first element carrying `itemprop="{name}"`.
///
/// Uses the element's text, falling back to its `content` attribute for
/// `<meta>`-style carriers with no text.
pub fn itemprop_value(document: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"[itemprop="{}"]"#, name)).ok()?;
    let element = document.select(&selector).next()?;

    let text = element_text(&element);
    if !text.is_empty() {
        return Some(text);
    }

    element
        .value()
        .attr("content")
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// `src` of the first `<img itemprop="image">`
pub fn itemprop_image_src(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"img[itemprop="image"]"#).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_microdata() {
        let html = r#"
        <div itemscope itemtype="https://schema.org/Product">
            <span itemprop="name">Test Product</span>
            <img itemprop="image" src="/media/p.jpg">
            <span itemprop="price">19.99</span>
        </div>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(itemprop_value(&document, "price").unwrap(), "19.99");
        assert_eq!(itemprop_value(&document, "name").unwrap(), "Test Product");
        assert_eq!(itemprop_image_src(&document).unwrap(), "/media/p.jpg");
    }

    #[test]
    fn test_content_attribute_fallback() {
        let html = r#"
        <div itemscope itemtype="https://schema.org/Offer">
            <meta itemprop="price" content="1299.00">
            <meta itemprop="priceCurrency" content="SEK">
        </div>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(itemprop_value(&document, "price").unwrap(), "1299.00");
    }

    #[test]
    fn test_missing_itemprop() {
        let document = Html::parse_document("<div><img src='/a.png'></div>");

        assert_eq!(itemprop_value(&document, "price"), None);
        assert_eq!(itemprop_image_src(&document), None);
    }
}
