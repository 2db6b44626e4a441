//! Trait seam between the orchestrator and the precedent backend.
//!
//! [`crate::session::LawApi`] is the production implementation. The
//! orchestrator only needs the two stages below, which keeps it testable
//! without a network.

use crate::error::SearchError;
use crate::types::{FetchOutcome, ResolveOutcome};

/// A backend that can resolve keywords and fetch precedent details.
///
/// Implementations must be `Send + Sync`: one instance is shared by every
/// concurrent detail fetch in a batch.
pub trait PrecedentSource: Send + Sync {
    /// Resolve keywords to precedent identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] for transport, status or parse failures.
    /// Callers in this crate log and absorb these.
    fn resolve(
        &self,
        keywords: &[String],
    ) -> impl std::future::Future<Output = Result<ResolveOutcome, SearchError>> + Send;

    /// Fetch and normalize one precedent.
    ///
    /// Never fails; failures are reported as [`FetchOutcome::Failed`].
    fn fetch_detail(
        &self,
        precedent_no: &str,
    ) -> impl std::future::Future<Output = FetchOutcome> + Send;
}
