//! Shared HTTP client and the JSON GET helper used by both endpoints.
//!
//! One [`reqwest::Client`] is built per retrieval batch so its connection
//! pool is reused by the list call and every detail call in that batch.

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Build a [`reqwest::Client`] configured for the law information API.
///
/// The client has:
/// - Per-request timeout from config
/// - User-Agent from config, or `law-search/<version>`
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => default_user_agent(),
    };

    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// `law-search/<crate version>`.
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Issue a GET with the given query pairs and parse the body as JSON.
///
/// Repeated keys in `params` are sent as repeated query parameters.
///
/// # Errors
///
/// - [`SearchError::Http`] if the request fails or the body cannot be read
/// - [`SearchError::Status`] for any non-success status
/// - [`SearchError::Parse`] if the body is not valid JSON
pub async fn get_json(
    client: &reqwest::Client,
    url: &str,
    params: &[(&str, &str)],
) -> Result<serde_json::Value, SearchError> {
    let response = client.get(url).query(params).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    tracing::trace!(bytes = body.len(), "response received");

    serde_json::from_str(&body).map_err(|e| SearchError::Parse(e.to_string()))
}
