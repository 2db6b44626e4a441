//! Core types for retrieved precedents and per-stage outcomes.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Placeholder for case metadata the detail endpoint does not provide.
pub const UNKNOWN: &str = "Unknown";

/// Page position sentinel; the Open API exposes no page information.
pub const START_PAGE_SENTINEL: &str = "0";

/// A single precedent with normalized body text.
///
/// Records built by this crate always carry non-empty `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precedent {
    /// Precedent serial number assigned by the source service.
    pub precedent_no: String,
    /// Case number, or [`UNKNOWN`].
    pub case_id: String,
    /// Case name, or [`UNKNOWN`].
    #[serde(alias = "file_name")]
    pub title: String,
    /// Always [`START_PAGE_SENTINEL`] for records from the Open API.
    pub start_page: String,
    /// Normalized body text.
    pub content: String,
    /// Relevance flag owned by downstream grading; starts `false`.
    #[serde(default)]
    pub is_relevant: bool,
}

/// Result of fetching one precedent's detail.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The record was retrieved and has usable content.
    Found(Precedent),
    /// The response was well formed but carried no usable body text.
    NoContent,
    /// Transport, status or parse failure.
    Failed(SearchError),
}

impl FetchOutcome {
    /// Collapse to the record, dropping the reason for its absence.
    pub fn into_precedent(self) -> Option<Precedent> {
        match self {
            Self::Found(precedent) => Some(precedent),
            Self::NoContent | Self::Failed(_) => None,
        }
    }
}

/// Result of resolving keywords to precedent identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The list endpoint returned at least one entry with an identifier.
    Found(Vec<String>),
    /// The response had no result container or no identifiable entries.
    NoResults,
}

impl ResolveOutcome {
    /// Collapse to a (possibly empty) identifier list.
    pub fn into_ids(self) -> Vec<String> {
        match self {
            Self::Found(ids) => ids,
            Self::NoResults => Vec::new(),
        }
    }
}

/// Precedents from one retrieval pass plus the updated attempt counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalBatch {
    /// Successfully fetched precedents, in no particular order.
    pub precedents: Vec<Precedent>,
    /// Workflow attempt counter after this pass.
    pub attempt_count: u32,
}

impl RetrievalBatch {
    /// A batch with no precedents and the given counter.
    pub fn empty(attempt_count: u32) -> Self {
        Self {
            precedents: Vec::new(),
            attempt_count,
        }
    }
}
