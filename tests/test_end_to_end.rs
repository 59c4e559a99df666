mod common;

use common::{dates, day, page, security, MockFetcher};
use quotefeed::domain::entities::security::Security;
use quotefeed::domain::error::QuoteError;
use quotefeed::domain::values::feed_config::{
    CLOSE_PROPERTY, DATE_FORMAT_PROPERTY, DATE_PROPERTY, FACTOR_PROPERTY, HIGH_PROPERTY,
    LOW_PROPERTY, VOLUME_PROPERTY,
};
use quotefeed::infrastructure::cache::noop::NoopPageCache;
use quotefeed::infrastructure::sqlite::page_cache::SqlitePageCache;
use quotefeed::JsonQuoteFeed;
use std::sync::Arc;

fn feed_with(fetcher: Arc<MockFetcher>) -> JsonQuoteFeed {
    JsonQuoteFeed::with_providers(fetcher, Arc::new(NoopPageCache))
}

#[tokio::test]
async fn test_historical_quotes_with_all_fields() {
    let body = r#"quotes({"chart": {"rows": [
        {"day": "02.01.2024", "close": 1234, "high": 1250, "low": 1200, "vol": 5000},
        {"day": "03.01.2024", "close": 1240, "high": 1260, "low": 1230, "vol": "6000"}
    ]}});"#;
    let fetcher = Arc::new(MockFetcher::new().with_page("https://feed.test/TST/history", body));
    let security = Security::new("Full")
        .with_ticker("TST")
        .with_feed_url("https://feed.test/{TICKER}/history")
        .with_property(DATE_PROPERTY, "$.chart.rows[*].day")
        .with_property(DATE_FORMAT_PROPERTY, "dd.MM.yyyy")
        .with_property(CLOSE_PROPERTY, "$.chart.rows[*].close")
        .with_property(HIGH_PROPERTY, "$.chart.rows[*].high")
        .with_property(LOW_PROPERTY, "$.chart.rows[*].low")
        .with_property(VOLUME_PROPERTY, "$.chart.rows[*].vol")
        .with_property(FACTOR_PROPERTY, "0.01");

    let data = feed_with(fetcher).historical_quotes(&security, false).await.unwrap();

    assert!(data.errors.is_empty(), "{:?}", data.errors);
    assert_eq!(data.points.len(), 2);
    let first = &data.points[0];
    assert_eq!(first.date, day(2024, 1, 2));
    assert_eq!(first.close, 1_234_000_000);
    assert_eq!(first.high, Some(1_250_000_000));
    assert_eq!(first.low, Some(1_200_000_000));
    assert_eq!(first.volume, Some(5000));
    assert_eq!(data.points[1].volume, Some(6000));
}

#[tokio::test]
async fn test_paged_url_stops_after_default_failures() {
    let fetcher = Arc::new(
        MockFetcher::new()
            .with_page("https://feed.test/q?page=1", page(&dates(0, 3), &[1.0, 2.0, 3.0]))
            .with_page("https://feed.test/q?page=2", page(&dates(3, 3), &[1.0, 2.0, 3.0]))
            .with_page("https://feed.test/q?page=3", page(&dates(3, 3), &[1.0, 2.0, 3.0]))
            .with_page("https://feed.test/q?page=4", page(&dates(3, 3), &[1.0, 2.0, 3.0])),
    );

    let data = feed_with(fetcher.clone())
        .historical_quotes(&security("https://feed.test/q?page={PAGE}"), false)
        .await
        .unwrap();

    assert_eq!(fetcher.calls().len(), 4);
    assert_eq!(data.points.len(), 6);
}

#[tokio::test]
async fn test_missing_close_path_fails_before_fetching() {
    let fetcher = Arc::new(MockFetcher::new());
    let security = Security::new("NoClose")
        .with_feed_url("https://feed.test/x")
        .with_property(DATE_PROPERTY, "$.d");

    let err = feed_with(fetcher.clone())
        .historical_quotes(&security, false)
        .await
        .unwrap_err();

    assert!(matches!(err, QuoteError::Configuration(_)));
    assert!(err.is_fatal());
    assert!(err.to_string().contains("NoClose"));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_missing_feed_url_is_configuration_error() {
    let security = Security::new("NoUrl")
        .with_property(DATE_PROPERTY, "$.d")
        .with_property(CLOSE_PROPERTY, "$.c");

    let err = feed_with(Arc::new(MockFetcher::new()))
        .historical_quotes(&security, false)
        .await
        .unwrap_err();
    assert!(matches!(err, QuoteError::Configuration(_)));
}

#[tokio::test]
async fn test_invalid_path_is_configuration_error() {
    let security = security("https://feed.test/x").with_property(CLOSE_PROPERTY, "$.[[");

    let err = feed_with(Arc::new(MockFetcher::new()))
        .historical_quotes(&security, false)
        .await
        .unwrap_err();
    assert!(matches!(err, QuoteError::Configuration(_)));
}

#[tokio::test]
async fn test_fetch_failure_yields_partial_result() {
    let data = feed_with(Arc::new(MockFetcher::new()))
        .historical_quotes(&security("https://feed.test/missing"), false)
        .await
        .unwrap();

    assert!(data.points.is_empty());
    assert!(data.has_errors());
    assert!(!data.errors[0].is_fatal());
}

#[tokio::test]
async fn test_preview_collects_responses() {
    let body = page(&dates(0, 2), &[1.0, 2.0]);
    let fetcher = Arc::new(MockFetcher::new().with_page("https://feed.test/p", body.clone()));

    let data = feed_with(fetcher)
        .preview_historical_quotes(&security("https://feed.test/p"))
        .await
        .unwrap();

    assert_eq!(data.points.len(), 2);
    assert_eq!(data.responses.len(), 1);
    assert_eq!(data.responses[0].body.as_deref(), Some(body.as_str()));
}

#[test]
fn test_parse_document_offline() {
    let feed = feed_with(Arc::new(MockFetcher::new()));
    let document = format!("callback({})", page(&dates(0, 3), &[1.0, 0.0, 3.0]));

    let data = feed
        .parse_document(&security("https://feed.test/unused"), &document)
        .unwrap();

    assert_eq!(data.points.len(), 2);
    assert!(data.errors.is_empty());
}

#[tokio::test]
async fn test_sqlite_cache_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pages.db");
    let path = path.to_str().unwrap();
    let security = security("https://feed.test/cached");

    let fetcher = Arc::new(
        MockFetcher::new().with_page("https://feed.test/cached", page(&dates(0, 2), &[1.0, 2.0])),
    );
    let first = JsonQuoteFeed::with_providers(fetcher.clone(), Arc::new(SqlitePageCache::open(path).unwrap()))
        .historical_quotes(&security, false)
        .await
        .unwrap();
    assert_eq!(fetcher.calls().len(), 1);

    let offline = Arc::new(MockFetcher::new());
    let second = JsonQuoteFeed::with_providers(offline.clone(), Arc::new(SqlitePageCache::open(path).unwrap()))
        .historical_quotes(&security, false)
        .await
        .unwrap();

    assert!(offline.calls().is_empty());
    assert_eq!(first.points, second.points);
}
