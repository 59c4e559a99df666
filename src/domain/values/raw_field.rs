use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;

/// An untyped value selected from a feed document.
///
/// JSON nulls, booleans, arrays and objects have no meaning for a quote and
/// are represented by the absence of a `RawField` (`Option::None`).
#[derive(Debug, Clone, PartialEq)]
pub enum RawField {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
}

impl RawField {
    pub fn from_json(value: &Value) -> Option<RawField> {
        match value {
            Value::String(s) => Some(RawField::Text(s.clone())),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(RawField::Integer(i)),
                None => n.as_f64().map(RawField::Float),
            },
            _ => None,
        }
    }
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawField::Text(s) => write!(f, "{s}"),
            RawField::Integer(i) => write!(f, "{i}"),
            RawField::Float(v) => write!(f, "{v}"),
            RawField::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::Text(s.to_string())
    }
}

impl From<i64> for RawField {
    fn from(i: i64) -> Self {
        RawField::Integer(i)
    }
}

impl From<f64> for RawField {
    fn from(v: f64) -> Self {
        RawField::Float(v)
    }
}

impl From<NaiveDate> for RawField {
    fn from(d: NaiveDate) -> Self {
        RawField::Date(d)
    }
}
