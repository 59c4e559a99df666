use crate::domain::error::QuoteError;
use crate::domain::ports::page_fetcher::PageFetcher;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_USER_AGENT: &str = concat!("quotefeed/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches JSON feed pages over HTTP.
///
/// Yahoo Finance rejects non-browser clients, so its hosts get a browser
/// user agent; every other host gets the crate's own.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, QuoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::config(format!("Cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn user_agent(url: &str) -> &'static str {
        if url.contains("finance.yahoo.com") {
            BROWSER_USER_AGENT
        } else {
            DEFAULT_USER_AGENT
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, QuoteError> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, Self::user_agent(url))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| QuoteError::fetch(url, e.to_string()))?;

        if !resp.status().is_success() {
            return Err(QuoteError::fetch(
                url,
                format!("Server returned {}", resp.status()),
            ));
        }

        resp.text()
            .await
            .map_err(|e| QuoteError::fetch(url, e.to_string()))
    }
}
