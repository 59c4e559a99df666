use crate::domain::entities::feed_data::{FeedData, RawResponse};
use crate::domain::entities::quote_point::QuotePoint;
use serde::Serialize;

/// JSON shape printed by the CLI for a quote retrieval.
#[derive(Debug, Serialize)]
pub struct FeedReport<'a> {
    pub points: &'a [QuotePoint],
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "no_responses")]
    pub responses: &'a [RawResponse],
}

fn no_responses(responses: &&[RawResponse]) -> bool {
    responses.is_empty()
}

impl<'a> From<&'a FeedData> for FeedReport<'a> {
    fn from(data: &'a FeedData) -> Self {
        Self {
            points: &data.points,
            errors: data.errors.iter().map(|e| e.to_string()).collect(),
            responses: &data.responses,
        }
    }
}
