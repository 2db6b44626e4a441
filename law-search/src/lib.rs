//! # law-search
//!
//! Court precedent retrieval from the national law information Open API.
//!
//! Given keywords chosen upstream, this crate resolves them to precedent
//! serial numbers through the list endpoint, fetches every precedent
//! through the detail endpoint concurrently, and returns cleaned records.
//!
//! ## Design
//!
//! - One pooled HTTP client per batch ([`LawApi`]), shared by all calls
//! - Bounded fan-out of detail fetches with a per-request timeout and a
//!   batch deadline
//! - Failure isolation: a failing detail fetch drops only that record
//! - Typed response schemas ([`api`]) tolerant of missing optional fields
//!
//! ## Security
//!
//! - The operator credential is never logged and is stripped from
//!   transport error messages
//! - Keywords are logged at info level; response bodies only at trace

pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod html;
pub mod http;
pub mod orchestrator;
pub mod resolver;
pub mod session;
pub mod source;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::FanOutLimits;
pub use session::LawApi;
pub use source::PrecedentSource;
pub use types::{FetchOutcome, Precedent, ResolveOutcome, RetrievalBatch};

/// Retrieve precedents for `keywords` and advance the attempt counter.
///
/// Never fails: lower-level failures shrink the batch, and a session
/// that cannot be opened yields an empty batch with the counter reset
/// to `0`. See [`orchestrator`] for the full state machine.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> law_search::Result<()> {
/// let config = law_search::SearchConfig::default().with_env()?;
/// let keywords = vec!["손해배상".to_string(), "과실".to_string()];
/// let batch = law_search::retrieve_precedents(&config, &keywords, 0).await;
/// for precedent in &batch.precedents {
///     println!("{} {}", precedent.case_id, precedent.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn retrieve_precedents(
    config: &SearchConfig,
    keywords: &[String],
    attempt_count: u32,
) -> RetrievalBatch {
    orchestrator::run(config, keywords, attempt_count).await
}

/// Normalize raw precedent body markup into plain text.
///
/// See [`html::normalize`].
pub fn normalize(raw: &str) -> String {
    html::normalize(raw)
}
