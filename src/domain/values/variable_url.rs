use crate::domain::entities::security::Security;
use crate::domain::error::QuoteError;
use crate::domain::ports::url_source::UrlSource;
use crate::domain::values::date_format::DateFormat;
use chrono::{Days, Months, NaiveDate};
use std::fmt::Write;

const DEFAULT_TODAY_FORMAT: &str = "%Y-%m-%d";

/// Failed pages tolerated by a paginated URL unless overridden.
pub const DEFAULT_PAGED_MAX_FAILED_ATTEMPTS: u64 = 1;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Ticker,
    Isin,
    Wkn,
    Currency,
    Today {
        format: Option<DateFormat>,
        shift: Option<DateShift>,
    },
    Page {
        start: u64,
        step: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateShift {
    Days(i64),
    Months(i64),
}

impl DateShift {
    fn parse(text: &str) -> Option<DateShift> {
        let unit = text.chars().last()?;
        let amount: i64 = text[..text.len() - unit.len_utf8()].parse().ok()?;
        match unit {
            'd' => Some(DateShift::Days(amount)),
            'w' => Some(DateShift::Days(amount.checked_mul(7)?)),
            'm' => Some(DateShift::Months(amount)),
            'y' => Some(DateShift::Months(amount.checked_mul(12)?)),
            _ => None,
        }
    }

    fn apply(&self, date: NaiveDate) -> Option<NaiveDate> {
        match *self {
            DateShift::Days(n) if n >= 0 => date.checked_add_days(Days::new(n as u64)),
            DateShift::Days(n) => date.checked_sub_days(Days::new(n.unsigned_abs())),
            DateShift::Months(n) => {
                let months = Months::new(u32::try_from(n.unsigned_abs()).ok()?);
                if n >= 0 {
                    date.checked_add_months(months)
                } else {
                    date.checked_sub_months(months)
                }
            }
        }
    }
}

/// A feed URL template with `{PLACEHOLDER}` variables.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableUrl {
    template: String,
    segments: Vec<Segment>,
    max_failed_attempts: Option<u64>,
}

impl VariableUrl {
    pub fn parse(template: &str) -> Result<Self, QuoteError> {
        if template.trim().is_empty() {
            return Err(QuoteError::config("Missing feed URL"));
        }

        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let close = rest[open..].find('}').map(|i| open + i).ok_or_else(|| {
                QuoteError::config(format!("Unterminated placeholder in URL '{template}'"))
            })?;
            segments.push(parse_placeholder(&rest[open + 1..close], template)?);
            rest = &rest[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        let pages = segments
            .iter()
            .filter(|s| matches!(s, Segment::Page { .. }))
            .count();
        if pages > 1 {
            return Err(QuoteError::config(format!(
                "URL '{template}' contains more than one PAGE placeholder"
            )));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
            max_failed_attempts: None,
        })
    }

    pub fn with_max_failed_attempts(mut self, attempts: u64) -> Self {
        self.max_failed_attempts = Some(attempts);
        self
    }

    pub fn is_paginated(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Page { .. }))
    }

    /// Substitutes security and date variables, leaving only the page counter open.
    pub fn bind(&self, security: &Security, today: NaiveDate) -> Result<BoundUrl, QuoteError> {
        let mut head = String::new();
        let mut tail = String::new();
        let mut page = None;

        for segment in &self.segments {
            let out = if page.is_some() { &mut tail } else { &mut head };
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Ticker => out.push_str(required(&security.ticker_symbol, "TICKER", security)?),
                Segment::Isin => out.push_str(required(&security.isin, "ISIN", security)?),
                Segment::Wkn => out.push_str(required(&security.wkn, "WKN", security)?),
                Segment::Currency => {
                    out.push_str(required(&security.currency_code, "CURRENCY", security)?)
                }
                Segment::Today { format, shift } => {
                    let date = match shift {
                        Some(s) => s.apply(today).ok_or_else(|| {
                            QuoteError::config(format!("Date offset out of range in '{}'", self.template))
                        })?,
                        None => today,
                    };
                    let fmt = format
                        .as_ref()
                        .map(|f| f.strftime())
                        .unwrap_or(DEFAULT_TODAY_FORMAT);
                    write!(out, "{}", date.format(fmt)).map_err(|_| {
                        QuoteError::config(format!("Cannot format date in '{}'", self.template))
                    })?;
                }
                Segment::Page { start, step } => page = Some((*start, *step)),
            }
        }

        let max_failed_attempts = self.max_failed_attempts.unwrap_or(if page.is_some() {
            DEFAULT_PAGED_MAX_FAILED_ATTEMPTS
        } else {
            0
        });

        Ok(BoundUrl {
            head,
            tail,
            page,
            max_failed_attempts,
        })
    }
}

fn required<'a>(
    value: &'a Option<String>,
    placeholder: &str,
    security: &Security,
) -> Result<&'a str, QuoteError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            QuoteError::config(format!(
                "Security '{}' has no value for URL placeholder {{{placeholder}}}",
                security.name
            ))
        })
}

fn parse_placeholder(content: &str, template: &str) -> Result<Segment, QuoteError> {
    let (name, args) = match content.split_once(':') {
        Some((n, a)) => (n, Some(a)),
        None => (content, None),
    };

    let invalid = || QuoteError::config(format!("Invalid placeholder {{{content}}} in URL '{template}'"));

    match (name, args) {
        ("TICKER", None) => Ok(Segment::Ticker),
        ("ISIN", None) => Ok(Segment::Isin),
        ("WKN", None) => Ok(Segment::Wkn),
        ("CURRENCY", None) => Ok(Segment::Currency),
        ("TODAY", None) => Ok(Segment::Today {
            format: None,
            shift: None,
        }),
        ("TODAY", Some(args)) => {
            // the trailing component is a shift only when it parses as one
            let (format, shift) = match args.rsplit_once(':') {
                Some((f, s)) => match DateShift::parse(s) {
                    Some(shift) => (f, Some(shift)),
                    None => (args, None),
                },
                None => (args, None),
            };
            let format = if format.is_empty() {
                None
            } else {
                Some(DateFormat::new(format)?)
            };
            Ok(Segment::Today { format, shift })
        }
        ("PAGE", args) => {
            let mut numbers = args.into_iter().flat_map(|a| a.split(':'));
            let start = match numbers.next() {
                Some(s) => s.parse().map_err(|_| invalid())?,
                None => 1,
            };
            let step = match numbers.next() {
                Some(s) => s.parse().map_err(|_| invalid())?,
                None => 1,
            };
            if step == 0 || numbers.next().is_some() {
                return Err(invalid());
            }
            Ok(Segment::Page { start, step })
        }
        _ => Err(invalid()),
    }
}

/// A URL template bound to one security and day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundUrl {
    head: String,
    tail: String,
    page: Option<(u64, u64)>,
    max_failed_attempts: u64,
}

impl UrlSource for BoundUrl {
    fn urls(&self) -> Box<dyn Iterator<Item = String> + Send + '_> {
        match self.page {
            None => Box::new(std::iter::once(format!("{}{}", self.head, self.tail))),
            Some((start, step)) => Box::new(
                std::iter::successors(Some(start), move |p| p.checked_add(step))
                    .map(move |p| format!("{}{p}{}", self.head, self.tail)),
            ),
        }
    }

    fn max_failed_attempts(&self) -> u64 {
        self.max_failed_attempts
    }
}
