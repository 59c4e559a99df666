use crate::domain::error::QuoteError;
use crate::domain::values::date_format::DateFormat;
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde_json_path::JsonPath;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DATE_PROPERTY: &str = "GENERIC-JSON-DATE";
pub const DATE_FORMAT_PROPERTY: &str = "GENERIC-JSON-DATE-FORMAT";
pub const DATE_TIMEZONE_PROPERTY: &str = "GENERIC-JSON-DATE-TIMEZONE";
pub const CLOSE_PROPERTY: &str = "GENERIC-JSON-CLOSE";
pub const HIGH_PROPERTY: &str = "GENERIC-JSON-HIGH";
pub const LOW_PROPERTY: &str = "GENERIC-JSON-LOW";
pub const FACTOR_PROPERTY: &str = "GENERIC-JSON-FACTOR";
pub const VOLUME_PROPERTY: &str = "GENERIC-JSON-VOLUME";

const LATEST_SUFFIX: &str = "-LATEST";

/// Which property set a fetch reads: the historic series or the latest quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedVariant {
    Historic,
    Latest,
}

impl FeedVariant {
    pub fn key(&self, base: &str) -> String {
        match self {
            FeedVariant::Historic => base.to_string(),
            FeedVariant::Latest => format!("{base}{LATEST_SUFFIX}"),
        }
    }
}

/// Unvalidated feed settings as stored on a security.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedConfiguration {
    pub date_path: Option<String>,
    pub close_path: Option<String>,
    pub high_path: Option<String>,
    pub low_path: Option<String>,
    pub volume_path: Option<String>,
    pub date_format: Option<String>,
    pub timezone: Option<String>,
    pub factor: Option<String>,
}

impl FeedConfiguration {
    pub fn from_properties(properties: &BTreeMap<String, String>, variant: FeedVariant) -> Self {
        let get = |base: &str| {
            properties
                .get(&variant.key(base))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            date_path: get(DATE_PROPERTY),
            close_path: get(CLOSE_PROPERTY),
            high_path: get(HIGH_PROPERTY),
            low_path: get(LOW_PROPERTY),
            volume_path: get(VOLUME_PROPERTY),
            date_format: get(DATE_FORMAT_PROPERTY),
            timezone: get(DATE_TIMEZONE_PROPERTY),
            factor: get(FACTOR_PROPERTY),
        }
    }

    /// Validates the settings once for a fetch. The zone offset is fixed at `now`.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<ResolvedFeed, QuoteError> {
        let (date_path, close_path) = match (&self.date_path, &self.close_path) {
            (Some(d), Some(c)) => (d, c),
            _ => {
                return Err(QuoteError::config(
                    "Missing path expression for date or close",
                ))
            }
        };

        let paths = FieldPaths {
            date: compile(date_path)?,
            close: compile(close_path)?,
            high: self.high_path.as_deref().map(compile).transpose()?,
            low: self.low_path.as_deref().map(compile).transpose()?,
            volume: self.volume_path.as_deref().map(compile).transpose()?,
        };

        let date_format = self.date_format.as_deref().map(DateFormat::new).transpose()?;

        let timezone = self
            .timezone
            .as_deref()
            .map(|name| {
                Tz::from_str(name)
                    .map_err(|e| QuoteError::config(format!("Unknown timezone '{name}': {e}")))
            })
            .transpose()?;

        let offset = zone_offset(timezone.as_ref(), now);

        let factor = match self.factor.as_deref() {
            Some(raw) => parse_factor(raw)?,
            None => Decimal::ONE,
        };

        Ok(ResolvedFeed {
            paths,
            date_format,
            offset,
            factor,
        })
    }
}

/// The offset of `timezone` at `now`, or UTC when no zone is configured.
pub fn zone_offset(timezone: Option<&Tz>, now: DateTime<Utc>) -> FixedOffset {
    match timezone {
        Some(tz) => tz.offset_from_utc_datetime(&now.naive_utc()).fix(),
        None => Utc.fix(),
    }
}

fn compile(expr: &str) -> Result<CompiledPath, QuoteError> {
    let path = JsonPath::parse(expr)
        .map_err(|e| QuoteError::config(format!("Invalid path expression '{expr}': {e}")))?;
    Ok(CompiledPath {
        source: expr.to_string(),
        path,
    })
}

fn parse_factor(raw: &str) -> Result<Decimal, QuoteError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| QuoteError::config(format!("Invalid factor '{raw}': {e}")))
}

/// A path expression together with the text it was compiled from.
pub struct CompiledPath {
    pub source: String,
    pub path: JsonPath,
}

impl fmt::Debug for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompiledPath({})", self.source)
    }
}

#[derive(Debug)]
pub struct FieldPaths {
    pub date: CompiledPath,
    pub close: CompiledPath,
    pub high: Option<CompiledPath>,
    pub low: Option<CompiledPath>,
    pub volume: Option<CompiledPath>,
}

/// Validated, immutable settings for one fetch.
#[derive(Debug)]
pub struct ResolvedFeed {
    pub paths: FieldPaths,
    pub date_format: Option<DateFormat>,
    pub offset: FixedOffset,
    pub factor: Decimal,
}
