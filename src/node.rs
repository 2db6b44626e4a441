//! The web search node: one retrieval pass per workflow visit.

use law_search::SearchConfig;

use crate::state::{GraphState, StateUpdate};

/// Run the web search node against `state`.
///
/// Never fails. An empty keyword list or a search with no hits yields an
/// empty update with the counter incremented; a search session that
/// cannot be opened yields an empty update with the counter reset to `0`.
pub async fn web_search_node(state: &GraphState, config: &SearchConfig) -> StateUpdate {
    let batch = law_search::retrieve_precedents(
        config,
        &state.web_search_keywords,
        state.web_search_count,
    )
    .await;
    tracing::info!(
        retrieved = batch.precedents.len(),
        web_search_count = batch.attempt_count,
        "web search node finished"
    );
    StateUpdate::from(batch)
}
