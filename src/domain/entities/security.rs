use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The instrument a quote feed is configured for.
///
/// `properties` carries the per-security feed settings keyed by the
/// `GENERIC-JSON-*` property names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Security {
    pub name: String,
    #[serde(default)]
    pub ticker_symbol: Option<String>,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub wkn: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub feed_url: Option<String>,
    #[serde(default)]
    pub latest_feed_url: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Security {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = Some(url.into());
        self
    }

    pub fn with_latest_feed_url(mut self, url: impl Into<String>) -> Self {
        self.latest_feed_url = Some(url.into());
        self
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker_symbol = Some(ticker.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn has_latest_feed(&self) -> bool {
        self.latest_feed_url
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty())
    }
}
