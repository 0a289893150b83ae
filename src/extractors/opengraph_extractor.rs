//! OpenGraph, Twitter Card and plain meta tag lookup
//!
//! OpenGraph tags are declared with `property=`, Twitter Card and standard
//! tags with `name=`, but real pages mix them up, so both attributes are
//! checked for every key.

use scraper::{Html, Selector};

/// Content of the meta tag for `key`.
///
/// Prefers the first `<meta property="key">`, then the first
/// `<meta name="key">`. Blank content counts as absent.
pub fn meta_content(document: &Html, key: &str) -> Option<String> {
    meta_attr_content(document, "property", key).or_else(|| meta_attr_content(document, "name", key))
}

fn meta_attr_content(document: &Html, attr: &str, key: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[{}="{}"]"#, attr, key)).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_opengraph() {
        let html = r#"
        <html>
        <head>
            <meta property="og:title" content="Test Page">
            <meta property="og:description" content="A test description">
            <meta property="og:image" content="https://example.com/image.jpg">
            <meta name="twitter:card" content="summary_large_image">
            <meta name="description" content="Page description">
        </head>
        </html>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(meta_content(&document, "og:title").unwrap(), "Test Page");
        assert_eq!(
            meta_content(&document, "twitter:card").unwrap(),
            "summary_large_image"
        );
        assert_eq!(
            meta_content(&document, "description").unwrap(),
            "Page description"
        );
        assert_eq!(meta_content(&document, "twitter:title"), None);
    }

    #[test]
    fn test_property_and_name_are_interchangeable() {
        let html = r#"
        <meta name="og:title" content="Declared with name">
        <meta property="product:price:amount" content="249.00">
        "#;
        let document = Html::parse_document(html);

        assert_eq!(
            meta_content(&document, "og:title").unwrap(),
            "Declared with name"
        );
        assert_eq!(
            meta_content(&document, "product:price:amount").unwrap(),
            "249.00"
        );
    }

    #[test]
    fn test_blank_property_falls_back_to_name() {
        let html = r#"
        <meta property="og:description" content="   ">
        <meta name="og:description" content="From name">
        "#;
        let document = Html::parse_document(html);

        assert_eq!(
            meta_content(&document, "og:description").unwrap(),
            "From name"
        );
    }
}
