use crate::domain::entities::quote_point::QuotePoint;
use crate::domain::error::QuoteError;
use serde::Serialize;

/// A page URL and the text it produced, kept for configuration previews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawResponse {
    pub url: String,
    pub body: Option<String>,
}

/// Outcome of a quote retrieval: possibly partial prices plus every
/// non-fatal error met on the way.
#[derive(Debug, Clone, Default)]
pub struct FeedData {
    pub points: Vec<QuotePoint>,
    pub errors: Vec<QuoteError>,
    pub responses: Vec<RawResponse>,
}

impl FeedData {
    pub fn add_error(&mut self, error: QuoteError) {
        self.errors.push(error);
    }

    pub fn add_response(&mut self, url: &str, body: Option<&str>) {
        self.responses.push(RawResponse {
            url: url.to_string(),
            body: body.map(String::from),
        });
    }

    pub fn latest(&self) -> Option<&QuotePoint> {
        self.points.iter().max_by_key(|p| p.date)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
