use crate::application::path_extractor::ExtractedColumns;
use crate::application::price_codec::{extract_integer_value, extract_value};
use crate::application::timestamp::extract_date_at;
use crate::domain::entities::quote_point::QuotePoint;
use crate::domain::error::QuoteError;
use crate::domain::values::feed_config::ResolvedFeed;
use crate::domain::values::raw_field::RawField;

/// Quote points of one page in document order, plus per-record failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuotes {
    pub points: Vec<QuotePoint>,
    pub errors: Vec<QuoteError>,
}

/// Zips extracted columns into quote points.
///
/// A record is kept only when its date resolves and its close is positive.
/// Fails for the whole page when the date and close columns differ in length.
pub fn assemble(columns: &ExtractedColumns, feed: &ResolvedFeed) -> Result<PageQuotes, QuoteError> {
    if columns.dates.len() != columns.closes.len() {
        return Err(QuoteError::parse(format!(
            "Number of date records ({}) and close records ({}) do not match",
            columns.dates.len(),
            columns.closes.len()
        )));
    }

    let mut page = PageQuotes::default();

    for (index, (raw_date, raw_close)) in columns.dates.iter().zip(&columns.closes).enumerate() {
        let date = match extract_date_at(raw_date.as_ref(), feed.date_format.as_ref(), feed.offset) {
            Ok(date) => date,
            Err(e) => {
                page.errors.push(e);
                continue;
            }
        };
        let close = extract_value(raw_close.as_ref(), feed.factor);

        let Some(date) = date else { continue };
        if close <= 0 {
            continue;
        }

        page.points.push(QuotePoint {
            date,
            close,
            high: columns
                .highs
                .as_ref()
                .map(|c| extract_value(cell(c, index), feed.factor)),
            low: columns
                .lows
                .as_ref()
                .map(|c| extract_value(cell(c, index), feed.factor)),
            volume: columns
                .volumes
                .as_ref()
                .map(|c| extract_integer_value(cell(c, index))),
        });
    }

    Ok(page)
}

fn cell(column: &[Option<RawField>], index: usize) -> Option<&RawField> {
    column.get(index).and_then(Option::as_ref)
}
