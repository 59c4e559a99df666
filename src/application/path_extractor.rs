use crate::domain::error::QuoteError;
use crate::domain::values::feed_config::{CompiledPath, FieldPaths};
use crate::domain::values::raw_field::RawField;
use serde_json::Value;

/// Column-wise raw values selected from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedColumns {
    pub dates: Vec<Option<RawField>>,
    pub closes: Vec<Option<RawField>>,
    pub highs: Option<Vec<Option<RawField>>>,
    pub lows: Option<Vec<Option<RawField>>>,
    pub volumes: Option<Vec<Option<RawField>>>,
}

pub fn extract_columns(document: &str, paths: &FieldPaths) -> Result<ExtractedColumns, QuoteError> {
    let root: Value = serde_json::from_str(document)
        .map_err(|e| QuoteError::parse(format!("Malformed JSON document: {e}")))?;

    Ok(ExtractedColumns {
        dates: select(&root, &paths.date),
        closes: select(&root, &paths.close),
        highs: paths.high.as_ref().map(|p| select(&root, p)),
        lows: paths.low.as_ref().map(|p| select(&root, p)),
        volumes: paths.volume.as_ref().map(|p| select(&root, p)),
    })
}

/// Evaluates `path` and always yields a list. A path that selects exactly one
/// array (e.g. `$.prices`) yields that array's elements.
fn select(root: &Value, path: &CompiledPath) -> Vec<Option<RawField>> {
    let nodes = path.path.query(root).all();

    if let [Value::Array(items)] = nodes.as_slice() {
        return items.iter().map(RawField::from_json).collect();
    }
    nodes.into_iter().map(RawField::from_json).collect()
}

/// Unwraps a JSONP response such as `callback({...});` to its JSON payload.
/// Anything that does not look like a callback invocation is returned as is.
pub fn strip_javascript_callback(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return text;
    }

    let Some(open) = trimmed.find('(') else {
        return text;
    };
    let name = trimmed[..open].trim();
    let is_identifier = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'));
    if !is_identifier {
        return text;
    }

    let without_semicolon = trimmed.trim_end_matches(|c: char| c == ';' || c.is_whitespace());
    match without_semicolon.strip_suffix(')') {
        Some(inner) if inner.len() > open => inner[open + 1..].trim(),
        _ => text,
    }
}
