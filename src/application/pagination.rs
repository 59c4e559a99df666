use crate::application::path_extractor::{extract_columns, strip_javascript_callback};
use crate::application::quote_assembler::assemble;
use crate::domain::entities::feed_data::FeedData;
use crate::domain::entities::quote_point::QuotePoint;
use crate::domain::entities::result_set::ResultSet;
use crate::domain::error::QuoteError;
use crate::domain::ports::page_cache::PageCache;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::ports::url_source::UrlSource;
use crate::domain::values::feed_config::ResolvedFeed;
use std::sync::Arc;
use tracing::{debug, warn};

/// Points after which a preview stops requesting further pages.
pub const PREVIEW_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Stop once [`PREVIEW_LIMIT`] points are collected.
    pub preview: bool,
    /// Keep every page's text in [`FeedData::responses`].
    pub collect_raw_responses: bool,
}

impl FetchOptions {
    pub fn preview() -> Self {
        Self {
            preview: true,
            collect_raw_responses: true,
        }
    }
}

/// Walks the pages of one quote request and merges their points.
pub struct PaginationDriver {
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<dyn PageCache>,
}

impl PaginationDriver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, cache: Arc<dyn PageCache>) -> Self {
        Self { fetcher, cache }
    }

    /// Never fails: fetch and parse problems end up in [`FeedData::errors`].
    pub async fn execute(
        &self,
        feed: &ResolvedFeed,
        source: &dyn UrlSource,
        options: FetchOptions,
    ) -> FeedData {
        let mut data = FeedData::default();
        let mut prices = ResultSet::new();
        let mut failed_attempts: u64 = 0;
        let max_failed_attempts = source.max_failed_attempts();

        for (page, url) in source.urls().enumerate() {
            let document = self.load(&url, &mut data).await;

            if options.collect_raw_responses {
                data.add_response(&url, document.as_deref());
            }

            let new_dates = match document {
                Some(doc) => prices.merge(parse_page(&url, &doc, feed, &mut data)),
                None => 0,
            };

            debug!(page, url = %url, new_dates, total = prices.len(), "page processed");

            if new_dates > 0 {
                failed_attempts = 0;
            } else {
                failed_attempts += 1;
                if failed_attempts > max_failed_attempts {
                    debug!(page, failed_attempts, "no new dates, stopping");
                    break;
                }
            }

            if options.preview && prices.len() >= PREVIEW_LIMIT {
                debug!(page, total = prices.len(), "preview limit reached");
                break;
            }
        }

        if prices.is_empty() {
            debug!("no quotes found in any page");
        }
        data.points = prices.into_vec();
        data
    }

    async fn load(&self, url: &str, data: &mut FeedData) -> Option<String> {
        match self.cache.lookup(url) {
            Ok(Some(cached)) => {
                debug!(url = %url, "page cache hit");
                return Some(cached);
            }
            Ok(None) => {}
            Err(e) => warn!(url = %url, error = %e, "page cache lookup failed"),
        }

        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %e, "page fetch failed");
                data.add_error(e);
                return None;
            }
        };

        let document = strip_javascript_callback(&body).to_string();
        if let Err(e) = self.cache.put(url, &document) {
            warn!(url = %url, error = %e, "page cache store failed");
        }
        Some(document)
    }
}

/// Extracts and assembles the points of one document. Failures are recorded
/// in `data` and contribute no points.
pub fn parse_page(
    url: &str,
    document: &str,
    feed: &ResolvedFeed,
    data: &mut FeedData,
) -> Vec<QuotePoint> {
    let page = extract_columns(document, &feed.paths).and_then(|cols| assemble(&cols, feed));

    match page {
        Ok(page) => {
            for e in page.errors {
                data.add_error(with_url(url, e));
            }
            page.points
        }
        Err(e) => {
            data.add_error(with_url(url, e));
            Vec::new()
        }
    }
}

fn with_url(url: &str, error: QuoteError) -> QuoteError {
    match error {
        QuoteError::Parse(msg) => QuoteError::Parse(format!("{url}\n{msg}")),
        other => other,
    }
}
