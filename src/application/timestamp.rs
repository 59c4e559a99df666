//! Resolution of raw feed values of unknown shape into calendar dates.

use crate::domain::error::QuoteError;
use crate::domain::values::date_format::{end_of_day, DateFormat};
use crate::domain::values::feed_config::zone_offset;
use crate::domain::values::raw_field::RawField;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// 2200-01-01T00:00:00Z in epoch seconds.
const EPOCH_SECONDS_2200_UTC: i64 = 7_258_118_400;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Length of `YYYY-MM-DD`.
const ISO_DATE_LEN: usize = 10;

/// Resolves `raw` to a date using the offset of `timezone` at the current instant.
pub fn extract_date(
    raw: Option<&RawField>,
    date_format: Option<&DateFormat>,
    timezone: Option<&Tz>,
) -> Result<Option<NaiveDate>, QuoteError> {
    extract_date_at(raw, date_format, zone_offset(timezone, Utc::now()))
}

/// Resolves `raw` to a date relative to a fixed `offset`.
///
/// `Ok(None)` means the value cannot be interpreted as a date and the record
/// should be dropped. An `Err` is returned only when an explicit `date_format`
/// does not match.
pub fn extract_date_at(
    raw: Option<&RawField>,
    date_format: Option<&DateFormat>,
    offset: FixedOffset,
) -> Result<Option<NaiveDate>, QuoteError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Some(format) = date_format {
        let local = format.parse(&raw.to_string())?;
        return Ok(Some(apply_offset(local, offset)));
    }

    match raw {
        RawField::Text(text) => {
            if let Some(local) = parse_iso(text) {
                return Ok(Some(apply_offset(local, offset)));
            }
            match text.trim().parse::<i64>() {
                Ok(epoch) => Ok(date_from_epoch(epoch, offset)),
                Err(_) => {
                    tracing::debug!(value = %text, "unrecognized date value, record dropped");
                    Ok(None)
                }
            }
        }
        RawField::Integer(epoch) => Ok(date_from_epoch(*epoch, offset)),
        RawField::Float(epoch) => Ok(date_from_epoch(*epoch as i64, offset)),
        RawField::Date(date) => Ok(Some(apply_offset(end_of_day(*date), offset))),
    }
}

/// Zoned date-time, then local date-time, then plain date. Seconds are
/// optional and any of them may carry `Z`, an offset or a `[region]` suffix.
/// A zone or offset in the text is ignored; only its local date-time fields
/// are used.
fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    let without_region = match text.find('[') {
        Some(i) if text.ends_with(']') => &text[..i],
        _ => text,
    };
    if let Ok(zoned) = DateTime::parse_from_rfc3339(without_region) {
        return Some(zoned.naive_local());
    }

    let local = strip_zone(without_region);
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(local, fmt) {
            return Some(local);
        }
    }

    NaiveDate::parse_from_str(local, "%Y-%m-%d")
        .ok()
        .map(end_of_day)
}

/// Drops a trailing `Z` or `±HH[:MM[:SS]]` offset following the date part.
fn strip_zone(text: &str) -> &str {
    if let Some(local) = text.strip_suffix(['Z', 'z']) {
        return local;
    }
    let Some(time_part) = text.get(ISO_DATE_LEN..) else {
        return text;
    };
    match time_part.rfind(['+', '-']) {
        Some(i) if is_offset(&time_part[i + 1..]) => &text[..ISO_DATE_LEN + i],
        _ => text,
    }
}

fn is_offset(text: &str) -> bool {
    let digits = text.chars().filter(|c| *c != ':').count();
    let groups_ok = text
        .split(':')
        .all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_digit()));
    let compact_ok = !text.contains(':') && text.chars().all(|c| c.is_ascii_digit());
    matches!(digits, 2 | 4 | 6) && (groups_ok || compact_ok)
}

/// Reads a local date-time as UTC and returns its date at `offset`.
fn apply_offset(local: NaiveDateTime, offset: FixedOffset) -> NaiveDate {
    Utc.from_utc_datetime(&local)
        .with_timezone(&offset)
        .date_naive()
}

/// Interprets an epoch value whose unit is unknown.
///
/// Values beyond 2200-01-01 (in seconds at `offset`) are milliseconds, values
/// below the number of days up to that date are days, everything else is
/// seconds. Millisecond values before 1970-03-26 00:08:38 and second values
/// before 1970-01-01 23:20:06 are therefore misread.
fn date_from_epoch(epoch: i64, offset: FixedOffset) -> Option<NaiveDate> {
    let future_epoch = EPOCH_SECONDS_2200_UTC - i64::from(offset.local_minus_utc());

    let seconds = if epoch > future_epoch {
        epoch / 1000
    } else if epoch < future_epoch / SECONDS_PER_DAY {
        epoch.checked_mul(SECONDS_PER_DAY)?
    } else {
        epoch
    };

    DateTime::from_timestamp(seconds, 0).map(|utc| utc.with_timezone(&offset).date_naive())
}
