//! Per-batch connection context for the law information API.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::fetcher;
use crate::http;
use crate::resolver;
use crate::source::PrecedentSource;
use crate::types::{FetchOutcome, ResolveOutcome};

/// A validated configuration plus one pooled HTTP client.
///
/// Created once per retrieval batch and shared read-only by the list call
/// and every detail fetch. Dropping it releases the connection pool.
#[derive(Debug)]
pub struct LawApi {
    client: reqwest::Client,
    config: SearchConfig,
}

impl LawApi {
    /// Validate `config` and build the shared client.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid configuration or
    /// [`SearchError::Http`] if the client cannot be constructed.
    pub fn open(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(config)?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configuration this session was opened with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl PrecedentSource for LawApi {
    async fn resolve(&self, keywords: &[String]) -> Result<ResolveOutcome, SearchError> {
        resolver::try_resolve(&self.client, &self.config, keywords).await
    }

    async fn fetch_detail(&self, precedent_no: &str) -> FetchOutcome {
        fetcher::fetch_outcome(&self.client, &self.config, precedent_no).await
    }
}
