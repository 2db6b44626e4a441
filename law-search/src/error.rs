//! Error types for the law-search crate.
//!
//! Messages are stable and never contain the operator credential.

/// Errors that can occur while talking to the law information API.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status code.
    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    /// The response body was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid or incomplete configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL: it carries the credential in its query string.
        Self::Http(err.without_url().to_string())
    }
}

/// Convenience type alias for law-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
