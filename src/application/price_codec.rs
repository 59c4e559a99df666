//! Conversion of raw feed values into fixed-point quote units.

use crate::domain::values::price::quote_factor;
use crate::domain::values::raw_field::RawField;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Converts a raw price into quote units, scaled by `factor` and rounded half-up.
///
/// Returns 0 for absent values, dates, unparseable text and results that do
/// not fit into an `i64`. Callers treat 0 as "no price".
pub fn extract_value(raw: Option<&RawField>, factor: Decimal) -> i64 {
    let value = match raw {
        Some(RawField::Integer(i)) => Some(Decimal::from(*i)),
        Some(RawField::Float(f)) => decimal_from_f64(*f),
        Some(RawField::Text(s)) => parse_number(s),
        Some(RawField::Date(_)) | None => None,
    };

    value.and_then(|v| to_quote_units(v, factor)).unwrap_or(0)
}

/// Extracts a whole number such as a trading volume. Returns 0 when the value
/// is absent or unparseable.
pub fn extract_integer_value(raw: Option<&RawField>) -> i64 {
    match raw {
        Some(RawField::Integer(i)) => *i,
        Some(RawField::Float(f)) => *f as i64,
        Some(RawField::Text(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| (f + 0.5).floor() as i64)
                })
                .unwrap_or(0)
        }
        Some(RawField::Date(_)) | None => 0,
    }
}

/// Tolerant number parser for quote text.
///
/// Accepts an optional sign, grouping separators (`,` `.` `'` `_` and
/// spaces) and either `.` or `,` as decimal separator. Parsing stops at the
/// first character that cannot be part of a number, so `"12.50 EUR"` is 12.5.
///
/// A lone `,` followed by exactly three digits is read as a thousands
/// separator (`"1,234"` is 1234); otherwise it is the decimal separator
/// (`"12,5"` is 12.5). With both `,` and `.` present the later one is the
/// decimal separator.
pub fn parse_number(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let numeric: Vec<char> = body
        .chars()
        .take_while(|c| c.is_ascii_digit() || is_separator(*c))
        .collect();

    if !numeric.iter().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let decimal_at = decimal_separator_position(&numeric);

    let mut normalized = String::with_capacity(numeric.len() + 1);
    if negative {
        normalized.push('-');
    }
    for (i, c) in numeric.iter().enumerate() {
        if c.is_ascii_digit() {
            normalized.push(*c);
        } else if Some(i) == decimal_at {
            if !normalized.ends_with(|d: char| d.is_ascii_digit()) {
                normalized.push('0');
            }
            normalized.push('.');
        }
    }
    if normalized.ends_with('.') {
        normalized.pop();
    }

    Decimal::from_str(&normalized).ok()
}

fn is_separator(c: char) -> bool {
    matches!(c, '.' | ',' | '\'' | '_' | ' ' | '\u{a0}' | '\u{202f}')
}

fn decimal_separator_position(chars: &[char]) -> Option<usize> {
    let last_dot = chars.iter().rposition(|c| *c == '.');
    let last_comma = chars.iter().rposition(|c| *c == ',');

    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => Some(dot.max(comma)),
        (Some(dot), None) => single_occurrence(chars, '.').then_some(dot),
        (None, Some(comma)) => {
            let digits_after = chars[comma + 1..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .count();
            let digits_before = chars[..comma].iter().any(|c| c.is_ascii_digit());
            let grouping = digits_before && digits_after == 3;
            (single_occurrence(chars, ',') && !grouping).then_some(comma)
        }
        (None, None) => None,
    }
}

fn single_occurrence(chars: &[char], sep: char) -> bool {
    chars.iter().filter(|c| **c == sep).count() == 1
}

fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    // the shortest round-trip representation, not the binary expansion
    Decimal::from_str(&value.to_string()).ok()
}

fn to_quote_units(value: Decimal, factor: Decimal) -> Option<i64> {
    value
        .checked_mul(factor)?
        .checked_mul(quote_factor())?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
