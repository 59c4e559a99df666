//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use quotefeed::domain::entities::security::Security;
use quotefeed::domain::error::QuoteError;
use quotefeed::domain::ports::page_fetcher::PageFetcher;
use quotefeed::domain::ports::url_source::UrlSource;
use quotefeed::domain::values::feed_config::{
    FeedConfiguration, ResolvedFeed, CLOSE_PROPERTY, DATE_PROPERTY,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned documents by URL and records every request.
/// Unknown URLs fail like a 404.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, QuoteError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| QuoteError::fetch(url, "Server returned 404 Not Found"))
    }
}

/// A fixed list of page URLs.
pub struct StaticUrls {
    pub urls: Vec<String>,
    pub max_failed_attempts: u64,
}

impl StaticUrls {
    pub fn new(urls: &[&str], max_failed_attempts: u64) -> Self {
        Self {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            max_failed_attempts,
        }
    }
}

impl UrlSource for StaticUrls {
    fn urls(&self) -> Box<dyn Iterator<Item = String> + Send + '_> {
        Box::new(self.urls.iter().cloned())
    }

    fn max_failed_attempts(&self) -> u64 {
        self.max_failed_attempts
    }
}

/// Resolved configuration reading `$.d` (dates) and `$.c` (closes).
pub fn simple_feed() -> ResolvedFeed {
    FeedConfiguration {
        date_path: Some("$.d".into()),
        close_path: Some("$.c".into()),
        ..Default::default()
    }
    .resolve(Utc::now())
    .unwrap()
}

/// `{"d": [...dates], "c": [...closes]}`
pub fn page(dates: &[String], closes: &[f64]) -> String {
    serde_json::json!({ "d": dates, "c": closes }).to_string()
}

/// `count` consecutive ISO dates starting `offset` days after 2020-01-01.
pub fn dates(offset: i64, count: i64) -> Vec<String> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (offset..offset + count)
        .map(|i| (start + Duration::days(i)).format("%Y-%m-%d").to_string())
        .collect()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Security with the historic date/close paths set to `$.d` / `$.c`.
pub fn security(feed_url: &str) -> Security {
    Security::new("Test Security")
        .with_ticker("TST")
        .with_feed_url(feed_url)
        .with_property(DATE_PROPERTY, "$.d")
        .with_property(CLOSE_PROPERTY, "$.c")
}
