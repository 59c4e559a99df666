pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::historical::HistoricalQuotesUseCase;
use crate::application::latest::LatestQuoteUseCase;
use crate::application::pagination::{FetchOptions, PaginationDriver};
use crate::domain::entities::feed_data::FeedData;
use crate::domain::entities::quote_point::QuotePoint;
use crate::domain::entities::security::Security;
use crate::domain::error::QuoteError;
use crate::domain::ports::page_cache::PageCache;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::infrastructure::cache::memory::InMemoryPageCache;
use crate::infrastructure::cache::noop::NoopPageCache;
use crate::infrastructure::feeds::http_fetcher::{HttpPageFetcher, DEFAULT_TIMEOUT};
use crate::infrastructure::sqlite::page_cache::SqlitePageCache;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_CACHE_MAX_AGE_SECS: i64 = 300;

/// Generic JSON quote feed: reads price history for a [`Security`] from any
/// JSON endpoint described by its `GENERIC-JSON-*` properties.
pub struct JsonQuoteFeed {
    historical_uc: Arc<HistoricalQuotesUseCase>,
    latest_uc: LatestQuoteUseCase,
}

impl JsonQuoteFeed {
    /// Wires the HTTP fetcher and a page cache chosen by `QUOTEFEED_CACHE`:
    /// unset for an in-memory cache, `none` to disable caching, or a path to
    /// a SQLite database.
    pub fn new() -> Result<Self, QuoteError> {
        let timeout = env_number("QUOTEFEED_HTTP_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let max_age = chrono::Duration::seconds(
            env_number("QUOTEFEED_CACHE_MAX_AGE_SECS").unwrap_or(DEFAULT_CACHE_MAX_AGE_SECS),
        );

        let cache: Arc<dyn PageCache> = match std::env::var("QUOTEFEED_CACHE").ok().as_deref() {
            Some("none") => Arc::new(NoopPageCache),
            Some(path) if !path.is_empty() => Arc::new(
                SqlitePageCache::open(path)
                    .map_err(QuoteError::Configuration)?
                    .with_max_age(max_age),
            ),
            _ => Arc::new(InMemoryPageCache::new().with_max_age(max_age)),
        };

        Ok(Self::with_providers(Arc::new(HttpPageFetcher::new(timeout)?), cache))
    }

    pub fn with_providers(fetcher: Arc<dyn PageFetcher>, cache: Arc<dyn PageCache>) -> Self {
        let driver = Arc::new(PaginationDriver::new(fetcher, cache));
        let historical_uc = Arc::new(HistoricalQuotesUseCase::new(driver));
        Self {
            latest_uc: LatestQuoteUseCase::new(historical_uc.clone()),
            historical_uc,
        }
    }

    pub async fn historical_quotes(
        &self,
        security: &Security,
        collect_raw_responses: bool,
    ) -> Result<FeedData, QuoteError> {
        let options = FetchOptions {
            preview: false,
            collect_raw_responses,
        };
        self.historical_uc.execute(security, options).await
    }

    /// Like [`historical_quotes`](Self::historical_quotes) but stops early at
    /// the preview limit and always keeps the raw responses.
    pub async fn preview_historical_quotes(&self, security: &Security) -> Result<FeedData, QuoteError> {
        self.historical_uc.execute(security, FetchOptions::preview()).await
    }

    pub async fn latest_quote(&self, security: &Security) -> Result<Option<QuotePoint>, QuoteError> {
        self.latest_uc.execute(security).await
    }

    pub fn parse_document(&self, security: &Security, document: &str) -> Result<FeedData, QuoteError> {
        self.historical_uc.parse_document(security, document)
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring non-numeric setting");
            None
        }
    }
}
