mod common;

use chrono::{FixedOffset, NaiveDate};
use common::day;
use quotefeed::application::timestamp::{extract_date, extract_date_at};
use quotefeed::domain::error::QuoteError;
use quotefeed::domain::values::date_format::DateFormat;
use quotefeed::domain::values::raw_field::RawField;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn tokyo() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn resolve(raw: RawField, offset: FixedOffset) -> Option<NaiveDate> {
    extract_date_at(Some(&raw), None, offset).unwrap()
}

#[test]
fn test_seconds_and_milliseconds_resolve_to_same_day() {
    let seconds = resolve(RawField::Integer(1_700_000_000), utc());
    let millis = resolve(RawField::Integer(1_700_000_000_000), utc());
    assert_eq!(seconds, Some(day(2023, 11, 14)));
    assert_eq!(seconds, millis);
}

#[test]
fn test_small_values_are_days() {
    assert_eq!(resolve(RawField::Integer(18_000), utc()), Some(day(2019, 4, 14)));
}

#[test]
fn test_millisecond_threshold_is_exclusive() {
    assert_eq!(resolve(RawField::Integer(7_258_118_400), utc()), Some(day(2200, 1, 1)));
    assert_eq!(resolve(RawField::Integer(7_258_118_401), utc()), Some(day(1970, 3, 26)));
}

#[test]
fn test_day_threshold_is_exclusive() {
    assert_eq!(resolve(RawField::Integer(84_005), utc()), Some(day(2199, 12, 31)));
    assert_eq!(resolve(RawField::Integer(84_006), utc()), Some(day(1970, 1, 1)));
}

#[test]
fn test_thresholds_shift_with_offset() {
    // 2200-01-01T00:00 in Tokyo
    assert_eq!(resolve(RawField::Integer(7_258_086_000), tokyo()), Some(day(2200, 1, 1)));
    assert_eq!(resolve(RawField::Integer(7_258_086_001), tokyo()), Some(day(1970, 3, 26)));

    assert_eq!(resolve(RawField::Integer(84_004), tokyo()), Some(day(2199, 12, 30)));
    assert_eq!(resolve(RawField::Integer(84_005), tokyo()), Some(day(1970, 1, 2)));
}

#[test]
fn test_numeric_text_is_treated_as_epoch() {
    assert_eq!(
        resolve(RawField::Text("1700000000".into()), utc()),
        Some(day(2023, 11, 14))
    );
    assert_eq!(
        resolve(RawField::Float(1_700_000_000_000.0), utc()),
        Some(day(2023, 11, 14))
    );
}

#[test]
fn test_iso_text_without_format() {
    assert_eq!(
        resolve(RawField::Text("2023-05-01T10:00:00Z".into()), utc()),
        Some(day(2023, 5, 1))
    );
    assert_eq!(
        resolve(RawField::Text("2023-05-01T10:00:00+02:00[Europe/Berlin]".into()), utc()),
        Some(day(2023, 5, 1))
    );
    assert_eq!(
        resolve(RawField::Text("2023-05-01T10:00".into()), utc()),
        Some(day(2023, 5, 1))
    );
}

#[test]
fn test_iso_text_without_seconds_or_with_zoned_date() {
    for text in [
        "2023-05-01T10:00Z",
        "2023-05-01T10:00+02:00",
        "2023-05-01T10:00-0500",
        "2023-05-01T10:00+02:00[Europe/Berlin]",
        "2023-05-01T10:00:00.250+02:00",
    ] {
        assert_eq!(resolve(RawField::Text(text.into()), utc()), Some(day(2023, 5, 1)), "{text}");
    }
}

#[test]
fn test_iso_date_with_zone_resolves_to_end_of_day() {
    assert_eq!(resolve(RawField::Text("2023-05-01Z".into()), utc()), Some(day(2023, 5, 1)));
    assert_eq!(
        resolve(RawField::Text("2023-05-01+02:00".into()), utc()),
        Some(day(2023, 5, 1))
    );
    assert_eq!(
        resolve(RawField::Text("2023-05-01+02:00".into()), tokyo()),
        Some(day(2023, 5, 2))
    );
}

#[test]
fn test_local_time_moves_with_offset() {
    assert_eq!(
        resolve(RawField::Text("2023-05-01T23:30:00".into()), tokyo()),
        Some(day(2023, 5, 2))
    );
}

#[test]
fn test_plain_date_under_positive_offset_rolls_forward() {
    // plain dates resolve to the end of the day before the offset applies
    assert_eq!(
        resolve(RawField::Text("2023-05-01".into()), tokyo()),
        Some(day(2023, 5, 2))
    );
    let west = FixedOffset::west_opt(7 * 3600).unwrap();
    assert_eq!(
        resolve(RawField::Text("2023-05-01".into()), west),
        Some(day(2023, 5, 1))
    );
}

#[test]
fn test_named_timezone() {
    let raw = RawField::Text("2023-05-01T23:30:00".into());
    let date = extract_date(Some(&raw), None, Some(&chrono_tz::Asia::Tokyo)).unwrap();
    assert_eq!(date, Some(day(2023, 5, 2)));

    let date = extract_date(Some(&raw), None, None).unwrap();
    assert_eq!(date, Some(day(2023, 5, 1)));
}

#[test]
fn test_unrecognized_text_is_dropped() {
    assert_eq!(resolve(RawField::Text("yesterday".into()), utc()), None);
    assert_eq!(resolve(RawField::Text(String::new()), utc()), None);
    assert_eq!(extract_date_at(None, None, utc()).unwrap(), None);
}

#[test]
fn test_explicit_format() {
    let format = DateFormat::new("dd.MM.yyyy").unwrap();
    let raw = RawField::Text("02.01.2024".into());
    assert_eq!(
        extract_date_at(Some(&raw), Some(&format), utc()).unwrap(),
        Some(day(2024, 1, 2))
    );

    let format = DateFormat::new("yyyyMMdd").unwrap();
    let raw = RawField::Integer(20240102);
    assert_eq!(
        extract_date_at(Some(&raw), Some(&format), utc()).unwrap(),
        Some(day(2024, 1, 2))
    );
}

#[test]
fn test_explicit_format_mismatch_is_parse_error() {
    let format = DateFormat::new("dd.MM.yyyy").unwrap();
    let raw = RawField::Text("2024-01-02".into());
    let err = extract_date_at(Some(&raw), Some(&format), utc()).unwrap_err();
    assert!(matches!(err, QuoteError::Parse(_)));
}
