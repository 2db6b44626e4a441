//! Workflow state fields read and written by the web search node.
//!
//! The surrounding workflow owns a larger state object; only the fields
//! below cross this boundary. Unknown fields are ignored on input.

use law_search::{Precedent, RetrievalBatch};
use serde::{Deserialize, Serialize};

/// Inbound state slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphState {
    /// Keywords chosen by the upstream grading step; may be empty.
    pub web_search_keywords: Vec<String>,
    /// How many times the web search node has run in this workflow.
    pub web_search_count: u32,
}

/// Outbound state update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    /// Precedents retrieved in this pass; may be empty.
    pub retrieved_precedents: Vec<Precedent>,
    /// Updated attempt counter.
    pub web_search_count: u32,
}

impl From<RetrievalBatch> for StateUpdate {
    fn from(batch: RetrievalBatch) -> Self {
        Self {
            retrieved_precedents: batch.precedents,
            web_search_count: batch.attempt_count,
        }
    }
}
