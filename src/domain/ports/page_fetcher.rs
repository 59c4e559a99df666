use crate::domain::error::QuoteError;
use async_trait::async_trait;

/// Retrieves the raw text of one feed page.
///
/// Implementations own the transport concerns (headers, user agent, timeouts).
/// Any failure is reported as [`QuoteError::Fetch`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, QuoteError>;
}
