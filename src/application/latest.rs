use crate::application::historical::HistoricalQuotesUseCase;
use crate::application::pagination::FetchOptions;
use crate::domain::entities::quote_point::QuotePoint;
use crate::domain::entities::security::Security;
use crate::domain::error::QuoteError;
use crate::domain::values::feed_config::FeedVariant;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct LatestQuoteUseCase {
    quotes: Arc<HistoricalQuotesUseCase>,
}

impl LatestQuoteUseCase {
    pub fn new(quotes: Arc<HistoricalQuotesUseCase>) -> Self {
        Self { quotes }
    }

    /// The most recent point of the latest-quote feed, or of the historic feed
    /// when the security has no separate latest feed URL.
    pub async fn execute(&self, security: &Security) -> Result<Option<QuotePoint>, QuoteError> {
        let data = if security.has_latest_feed() {
            self.quotes
                .run(
                    security,
                    security.latest_feed_url.as_deref(),
                    FeedVariant::Latest,
                    FetchOptions::default(),
                )
                .await?
        } else {
            debug!(security = %security.name, "no latest feed URL, using historic feed");
            self.quotes.execute(security, FetchOptions::default()).await?
        };

        for error in &data.errors {
            warn!(security = %security.name, error = %error, "latest quote");
        }

        Ok(data.latest().cloned())
    }
}
