//! Product page fetching
//!
//! One GET per call with a browser-like request signature, a whole-request
//! timeout and a bounded redirect chain. Failures are reported, never
//! retried; retry policy belongs to the caller.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::error::FetchError;

/// HTTP client configured once and reused for every fetch
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    max_redirects: usize,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_redirects: config.max_redirects,
        })
    }

    /// Fetch the raw markup of `url`
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = parse_page_url(url)?;
        debug!(url, "fetching product page");

        let response = match self.client.get(parsed).send().await {
            Ok(response) => response,
            Err(err) => {
                let err = FetchError::from_reqwest(url, self.max_redirects, err);
                warn!(url, error = %err, "fetch failed");
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|err| {
            let err = FetchError::from_reqwest(url, self.max_redirects, err);
            warn!(url, error = %err, "failed to read body");
            err
        })?;

        info!(url, status = status.as_u16(), bytes = body.len(), "fetched product page");
        Ok(body)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|e| FetchError::Client(format!("invalid header value {:?}: {}", value, e)))
}

/// Accept only absolute http(s) URLs
fn parse_page_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {}", other),
        }),
    }
}
