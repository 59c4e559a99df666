use crate::application::pagination::{parse_page, FetchOptions, PaginationDriver};
use crate::application::path_extractor::strip_javascript_callback;
use crate::domain::entities::feed_data::FeedData;
use crate::domain::entities::result_set::ResultSet;
use crate::domain::entities::security::Security;
use crate::domain::error::QuoteError;
use crate::domain::values::feed_config::{FeedConfiguration, FeedVariant, ResolvedFeed};
use crate::domain::values::variable_url::VariableUrl;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub struct HistoricalQuotesUseCase {
    driver: Arc<PaginationDriver>,
}

impl HistoricalQuotesUseCase {
    pub fn new(driver: Arc<PaginationDriver>) -> Self {
        Self { driver }
    }

    pub async fn execute(&self, security: &Security, options: FetchOptions) -> Result<FeedData, QuoteError> {
        self.run(security, security.feed_url.as_deref(), FeedVariant::Historic, options)
            .await
    }

    /// Validates the configuration selected by `variant`, binds `feed_url` and
    /// drives the pages. Only configuration problems are returned as `Err`.
    pub async fn run(
        &self,
        security: &Security,
        feed_url: Option<&str>,
        variant: FeedVariant,
        options: FetchOptions,
    ) -> Result<FeedData, QuoteError> {
        let now = Utc::now();
        let feed = resolve_feed(security, variant)?;

        let template = feed_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| QuoteError::config(format!("Missing feed URL for security '{}'", security.name)))?;
        let url = VariableUrl::parse(template)?;
        let urls = url.bind(security, now.date_naive())?;

        info!(
            security = %security.name,
            url = template,
            paginated = url.is_paginated(),
            ?variant,
            preview = options.preview,
            "fetching quotes"
        );
        let data = self.driver.execute(&feed, &urls, options).await;
        info!(
            security = %security.name,
            points = data.points.len(),
            errors = data.errors.len(),
            "quotes fetched"
        );

        Ok(data)
    }

    /// Runs extraction and assembly over a document that is already at hand.
    pub fn parse_document(&self, security: &Security, document: &str) -> Result<FeedData, QuoteError> {
        let feed = resolve_feed(security, FeedVariant::Historic)?;
        let source = security.feed_url.as_deref().unwrap_or("<document>");

        let mut data = FeedData::default();
        let points = parse_page(source, strip_javascript_callback(document), &feed, &mut data);
        data.points = points.into_iter().collect::<ResultSet>().into_vec();
        Ok(data)
    }
}

fn resolve_feed(security: &Security, variant: FeedVariant) -> Result<ResolvedFeed, QuoteError> {
    FeedConfiguration::from_properties(&security.properties, variant)
        .resolve(Utc::now())
        .map_err(|e| match e {
            QuoteError::Configuration(msg) => {
                QuoteError::Configuration(format!("{msg} (security '{}')", security.name))
            }
            other => other,
        })
}
