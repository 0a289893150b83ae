//! Extraction entry point
//!
//! [`Engine`] owns the immutable configuration and the HTTP client. A call
//! fetches once, then parses and extracts in memory; nothing is shared
//! between calls, so any number may run at the same time.

use futures::stream::{self, StreamExt};
use tracing::info;

use crate::classify::classify;
use crate::config::EngineConfig;
use crate::error::FetchError;
use crate::extractors::{extract, ScrapeResult};
use crate::fetch::PageFetcher;

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    fetcher: PageFetcher,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, FetchError> {
        let fetcher = PageFetcher::new(&config.fetch)?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch `url` and extract its product metadata.
    ///
    /// Only fetch failures are returned as errors; every extraction miss
    /// resolves to a default value.
    pub async fn extract_product(&self, url: &str) -> Result<ScrapeResult, FetchError> {
        let html = self.fetcher.fetch(url).await?;
        let result = self.extract(url, &html);
        info!(url, title = %result.title, price = %result.price, "extracted product");
        Ok(result)
    }

    /// Extract from markup the caller already has
    pub fn extract(&self, url: &str, html: &str) -> ScrapeResult {
        extract(url, html, &self.config)
    }

    /// Category for an extracted product
    pub fn categorize(&self, result: &ScrapeResult) -> &str {
        classify(
            &result.title,
            &result.description,
            &result.url,
            &self.config.taxonomy,
        )
    }

    /// Extract several URLs with at most `concurrency` fetches in flight.
    ///
    /// Results come back in input order, one per URL.
    pub async fn extract_many<I, S>(
        &self,
        urls: I,
        concurrency: usize,
    ) -> Vec<(String, Result<ScrapeResult, FetchError>)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        stream::iter(urls.into_iter().map(Into::into))
            .map(|url: String| async move {
                let result = self.extract_product(&url).await;
                (url, result)
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_and_categorize() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let html = r#"
        <meta property="og:title" content="Sony PlayStation 5 Slim">
        <meta property="og:image" content="/media/ps5.png">
        <span itemprop="price">5990</span>
        "#;

        let result = engine.extract("https://shop.example/p/ps5", html);
        assert_eq!(result.title, "Sony PlayStation 5 Slim");
        assert_eq!(result.image, "https://shop.example/media/ps5.png");
        assert_eq!(result.price, "5990 kr");
        assert_eq!(engine.categorize(&result), "Gaming");
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
