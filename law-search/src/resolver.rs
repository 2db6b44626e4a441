//! Keyword → precedent identifier resolution via the list endpoint.
//!
//! [`resolve`] never fails: transport, status and parse errors are logged
//! at error level, a missing result container at info level, and both
//! yield an empty list. [`try_resolve`] keeps the distinction for callers
//! that need it.

use crate::api::{ListResponse, PrecSummary};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::ResolveOutcome;

/// `target` value selecting the precedent domain.
pub const TARGET_PRECEDENT: &str = "prec";
/// `type` value selecting JSON responses.
pub const RESPONSE_TYPE: &str = "JSON";
/// `search` value selecting full-text (body) search.
const SEARCH_MODE_FULL_TEXT: &str = "2";
/// Only the first result page is requested.
const FIRST_PAGE: &str = "1";

/// Resolve keywords to precedent identifiers.
///
/// Returns an empty list on any failure or when nothing matched.
pub async fn resolve(
    client: &reqwest::Client,
    config: &SearchConfig,
    keywords: &[String],
) -> Vec<String> {
    ids_or_empty(try_resolve(client, config, keywords).await)
}

/// Collapse a resolution result to identifiers, logging failures.
pub(crate) fn ids_or_empty(result: Result<ResolveOutcome, SearchError>) -> Vec<String> {
    match result {
        Ok(outcome) => outcome.into_ids(),
        Err(SearchError::Status(status)) => {
            tracing::error!(status, "list endpoint returned non-success status");
            Vec::new()
        }
        Err(SearchError::Parse(e)) => {
            tracing::error!(error = %e, "list endpoint response is not valid JSON");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(error = %e, "precedent list request failed");
            Vec::new()
        }
    }
}

/// Resolve keywords, reporting failures as errors.
///
/// # Errors
///
/// Returns [`SearchError::Http`], [`SearchError::Status`] or
/// [`SearchError::Parse`] from the list request. A response without a
/// usable result container is [`ResolveOutcome::NoResults`], not an error.
pub async fn try_resolve(
    client: &reqwest::Client,
    config: &SearchConfig,
    keywords: &[String],
) -> Result<ResolveOutcome, SearchError> {
    let display = config.display.to_string();
    let params = list_params(config, &display, keywords);
    let body = http::get_json(client, &config.search_url, &params).await?;
    let outcome = parse_list_response(body);
    if outcome == ResolveOutcome::NoResults {
        tracing::info!(?keywords, "no precedents matched");
    }
    Ok(outcome)
}

/// Query pairs for the list endpoint, one `query` pair per keyword.
pub(crate) fn list_params<'a>(
    config: &'a SearchConfig,
    display: &'a str,
    keywords: &'a [String],
) -> Vec<(&'a str, &'a str)> {
    let mut params = vec![
        ("OC", config.credential.as_str()),
        ("target", TARGET_PRECEDENT),
        ("type", RESPONSE_TYPE),
        ("search", SEARCH_MODE_FULL_TEXT),
        ("display", display),
        ("page", FIRST_PAGE),
    ];
    params.extend(keywords.iter().map(|k| ("query", k.as_str())));
    params
}

/// Extract identifiers from a parsed list response.
///
/// Accepts the result collection as either one object or an array.
/// Entries that are not objects, or lack a serial number, are skipped.
pub(crate) fn parse_list_response(body: serde_json::Value) -> ResolveOutcome {
    if !body.is_object() {
        tracing::debug!("list response is not a JSON object");
        return ResolveOutcome::NoResults;
    }
    let response: ListResponse = match serde_json::from_value(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(error = %e, "list response has an unexpected shape");
            return ResolveOutcome::NoResults;
        }
    };

    let Some(matches) = response.prec_search.and_then(|search| search.prec) else {
        return ResolveOutcome::NoResults;
    };

    let entries = matches.into_vec();
    let total = entries.len();
    let ids: Vec<String> = entries
        .into_iter()
        .filter_map(PrecSummary::from_entry)
        .filter_map(|entry| entry.serial_no)
        .collect();
    tracing::debug!(total, ids = ids.len(), "precedent identifiers extracted");

    if ids.is_empty() {
        ResolveOutcome::NoResults
    } else {
        ResolveOutcome::Found(ids)
    }
}
