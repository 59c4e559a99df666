use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of a security's price history in fixed-point quote units.
///
/// `None` for high, low or volume means the feed does not provide the field,
/// which is distinct from a provided value of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePoint {
    pub date: NaiveDate,
    pub close: i64,
    pub high: Option<i64>,
    pub low: Option<i64>,
    pub volume: Option<i64>,
}

impl QuotePoint {
    pub fn new(date: NaiveDate, close: i64) -> Self {
        Self {
            date,
            close,
            high: None,
            low: None,
            volume: None,
        }
    }
}
