use crate::domain::error::QuoteError;
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// A configured date pattern.
///
/// Accepts chrono `strftime` syntax directly, or a Java-style pattern
/// (`dd.MM.yyyy HH:mm`) which is translated once when the format is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    strftime: String,
}

impl DateFormat {
    pub fn new(pattern: &str) -> Result<Self, QuoteError> {
        if pattern.trim().is_empty() {
            return Err(QuoteError::config("Date format must not be empty"));
        }
        let strftime = if pattern.contains('%') {
            pattern.to_string()
        } else {
            translate_java_pattern(pattern)?
        };
        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(QuoteError::config(format!("Invalid date format '{pattern}'")));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            strftime,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Parses `text` into a local date-time. Patterns without a time of day
    /// resolve to the last instant of the parsed day.
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime, QuoteError> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, &self.strftime) {
            return Ok(dt);
        }
        NaiveDate::parse_from_str(text, &self.strftime)
            .map(end_of_day)
            .map_err(|e| {
                QuoteError::parse(format!(
                    "'{text}' does not match date format '{}': {e}",
                    self.pattern
                ))
            })
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// Last representable instant of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999999999 is always a valid time
    date.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}

fn translate_java_pattern(pattern: &str) -> Result<String, QuoteError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // '' is an escaped quote, otherwise a quoted literal runs to the next quote
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            let mut j = i + 1;
            while j < chars.len() {
                if chars[j] == '\'' {
                    if chars.get(j + 1) != Some(&'\'') {
                        break;
                    }
                    out.push('\'');
                    j += 2;
                    continue;
                }
                push_literal(&mut out, chars[j]);
                j += 1;
            }
            if j == chars.len() {
                return Err(QuoteError::config(format!(
                    "Unterminated quote in date format '{pattern}'"
                )));
            }
            i = j + 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        let spec = match (c, run) {
            ('y' | 'u', 2) => "%y",
            ('y' | 'u', _) => "%Y",
            ('M', 1 | 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1 | 2) => "%d",
            ('H', 1 | 2) => "%H",
            ('h', 1 | 2) => "%I",
            ('m', 1 | 2) => "%M",
            ('s', 1 | 2) => "%S",
            ('S', 3) => "%3f",
            ('S', 6) => "%6f",
            ('S', 9) => "%9f",
            ('S', _) => "%f",
            ('a', 1) => "%p",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            ('X' | 'x', 3) | ('Z', 5) => "%:z",
            ('X' | 'x', 1 | 2) | ('Z', 1..=3) => "%z",
            _ => {
                return Err(QuoteError::config(format!(
                    "Unsupported pattern letters '{}' in date format '{pattern}'",
                    c.to_string().repeat(run)
                )))
            }
        };
        out.push_str(spec);
        i += run;
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
