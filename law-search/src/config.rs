//! Retrieval configuration with sensible defaults.
//!
//! [`SearchConfig`] carries the operator credential, both endpoint URLs,
//! and the knobs that bound a retrieval batch. The credential and URLs
//! normally come from the environment via [`SearchConfig::with_env`].

use crate::error::SearchError;
use std::time::Duration;

/// Environment variable holding the operator credential (`OC` parameter).
pub const ENV_USER_ID: &str = "OPEN_API_USER_ID";
/// Environment variable holding the list endpoint URL.
pub const ENV_SEARCH_URL: &str = "OPEN_API_SEARCH_URL";
/// Environment variable holding the detail endpoint URL.
pub const ENV_SERVICE_URL: &str = "OPEN_API_SERVICE_URL";

/// Configuration for a precedent retrieval batch.
///
/// Use [`Default::default()`] for the tunables and fill in the endpoint
/// fields, or call [`SearchConfig::with_env`] to take them from the
/// process environment.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Operator credential sent as the `OC` query parameter.
    pub credential: String,
    /// List endpoint URL.
    pub search_url: String,
    /// Detail endpoint URL.
    pub service_url: String,
    /// Number of list results requested per search (`display` parameter).
    pub display: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum number of detail fetches in flight at once.
    pub max_concurrent_fetches: usize,
    /// Upper bound in seconds for the whole detail fan-out.
    pub batch_deadline_seconds: u64,
    /// Custom User-Agent string. If `None`, the crate name and version are used.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            credential: String::new(),
            search_url: String::new(),
            service_url: String::new(),
            display: 20,
            timeout_seconds: 10,
            max_concurrent_fetches: 8,
            batch_deadline_seconds: 60,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Overlay the credential and endpoint URLs from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] naming the first variable that is
    /// missing or empty.
    pub fn with_env(self) -> Result<Self, SearchError> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay the credential and endpoint URLs using a custom lookup.
    ///
    /// # Errors
    ///
    /// Same as [`SearchConfig::with_env`].
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self, SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| SearchError::Config(format!("environment variable {key} is not set")))
        };
        self.credential = require(ENV_USER_ID)?;
        self.search_url = require(ENV_SEARCH_URL)?;
        self.service_url = require(ENV_SERVICE_URL)?;
        Ok(self)
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Batch deadline as a [`Duration`].
    pub fn batch_deadline(&self) -> Duration {
        Duration::from_secs(self.batch_deadline_seconds)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `credential` must not be empty
    /// - `search_url` and `service_url` must be absolute http(s) URLs
    /// - `display`, `timeout_seconds`, `max_concurrent_fetches` and
    ///   `batch_deadline_seconds` must be greater than 0
    /// - `batch_deadline_seconds` must be >= `timeout_seconds`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.credential.trim().is_empty() {
            return Err(SearchError::Config("credential must not be empty".into()));
        }
        validate_endpoint("search_url", &self.search_url)?;
        validate_endpoint("service_url", &self.service_url)?;
        if self.display == 0 {
            return Err(SearchError::Config("display must be greater than 0".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(SearchError::Config(
                "max_concurrent_fetches must be greater than 0".into(),
            ));
        }
        if self.batch_deadline_seconds == 0 {
            return Err(SearchError::Config(
                "batch_deadline_seconds must be greater than 0".into(),
            ));
        }
        if self.batch_deadline_seconds < self.timeout_seconds {
            return Err(SearchError::Config(
                "batch_deadline_seconds must be >= timeout_seconds".into(),
            ));
        }
        Ok(())
    }
}

fn validate_endpoint(field: &str, value: &str) -> Result<(), SearchError> {
    if value.trim().is_empty() {
        return Err(SearchError::Config(format!("{field} must not be empty")));
    }
    let parsed = url::Url::parse(value)
        .map_err(|e| SearchError::Config(format!("{field} is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SearchError::Config(format!(
            "{field} must use http or https, got {other}"
        ))),
    }
}
