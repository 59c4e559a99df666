use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    /// Missing or invalid feed configuration. Fatal for the whole fetch.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network or HTTP failure for a single page.
    #[error("Fetch error: {url}\n{message}")]
    Fetch { url: String, message: String },

    /// Malformed document, mismatched columns or an unparseable record.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl QuoteError {
    pub fn config(msg: impl Into<String>) -> Self {
        QuoteError::Configuration(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        QuoteError::Parse(msg.into())
    }

    pub fn fetch(url: impl Into<String>, msg: impl Into<String>) -> Self {
        QuoteError::Fetch {
            url: url.into(),
            message: msg.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, QuoteError::Configuration(_))
    }
}
