//! Retrieval orchestrator: resolve once, fan out detail fetches, aggregate.
//!
//! # Pipeline
//!
//! ```text
//! START ─► no keywords ──────────────────────────────► (empty, count + 1)
//!   │
//!   ├─► open session ─► resolve ─► no ids ───────────► (empty, count + 1)
//!   │                      │
//!   │                      └─► fan-out fetch ─► keep Found ─► (survivors, count + 1)
//!   │
//!   └─► unexpected failure ──────────────────────────► (empty, 0)
//! ```
//!
//! The attempt counter resets to zero only on the unexpected-failure path;
//! every other path increments it.

use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::resolver;
use crate::session::LawApi;
use crate::source::PrecedentSource;
use crate::types::{FetchOutcome, RetrievalBatch};

/// Concurrency and time limits for the detail fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOutLimits {
    /// Maximum detail fetches in flight at once. Never below 1.
    pub max_in_flight: usize,
    /// Upper bound for the whole fan-out.
    pub deadline: Duration,
}

impl FanOutLimits {
    /// Build limits, clamping `max_in_flight` to at least 1.
    pub fn new(max_in_flight: usize, deadline: Duration) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
            deadline,
        }
    }
}

impl From<&SearchConfig> for FanOutLimits {
    fn from(config: &SearchConfig) -> Self {
        Self::new(config.max_concurrent_fetches, config.batch_deadline())
    }
}

/// Run one retrieval pass against the law information API.
///
/// Never fails. Session setup problems (invalid configuration, client
/// construction) are logged and reported as an empty batch with the
/// attempt counter reset to `0`.
pub async fn run(config: &SearchConfig, keywords: &[String], attempt_count: u32) -> RetrievalBatch {
    let keywords = clean_keywords(keywords);
    if keywords.is_empty() {
        return skipped(attempt_count);
    }

    match try_run(config, &keywords, attempt_count).await {
        Ok(batch) => batch,
        Err(e) => {
            tracing::error!(error = %e, details = ?e, "precedent retrieval failed; resetting attempt counter");
            RetrievalBatch::empty(0)
        }
    }
}

async fn try_run(
    config: &SearchConfig,
    keywords: &[String],
    attempt_count: u32,
) -> Result<RetrievalBatch, SearchError> {
    let api = LawApi::open(config)?;
    let limits = FanOutLimits::from(config);
    Ok(retrieve_cleaned(&api, keywords, attempt_count, limits).await)
}

/// Run one retrieval pass against any [`PrecedentSource`].
///
/// Resolves `keywords` once, fetches every identifier concurrently (at
/// most `limits.max_in_flight` at a time), and keeps only the records
/// that were found. Survivors are in completion order. If the deadline
/// elapses, fetches still in flight are dropped and the records
/// collected so far are returned.
pub async fn retrieve<S: PrecedentSource>(
    source: &S,
    keywords: &[String],
    attempt_count: u32,
    limits: FanOutLimits,
) -> RetrievalBatch {
    let keywords = clean_keywords(keywords);
    if keywords.is_empty() {
        return skipped(attempt_count);
    }
    retrieve_cleaned(source, &keywords, attempt_count, limits).await
}

/// [`retrieve`] for keywords already passed through [`clean_keywords`].
async fn retrieve_cleaned<S: PrecedentSource>(
    source: &S,
    keywords: &[String],
    attempt_count: u32,
    limits: FanOutLimits,
) -> RetrievalBatch {
    let next_count = attempt_count.saturating_add(1);
    tracing::info!(?keywords, attempt = next_count, "precedent search started");

    let ids = resolver::ids_or_empty(source.resolve(keywords).await);
    if ids.is_empty() {
        tracing::info!("no precedents found for keywords");
        return RetrievalBatch::empty(next_count);
    }

    let requested = ids.len();
    tracing::info!(requested, "fetching precedent details");

    let mut fetches = stream::iter(ids)
        .map(|id| async move { source.fetch_detail(&id).await })
        .buffer_unordered(limits.max_in_flight);

    let mut precedents = Vec::with_capacity(requested);
    let mut no_content = 0usize;
    let mut failed = 0usize;

    let drained = tokio::time::timeout(limits.deadline, async {
        while let Some(outcome) = fetches.next().await {
            match outcome {
                FetchOutcome::Found(precedent) => precedents.push(precedent),
                FetchOutcome::NoContent => no_content += 1,
                FetchOutcome::Failed(_) => failed += 1,
            }
        }
    })
    .await;

    if drained.is_err() {
        let completed = precedents.len() + no_content + failed;
        tracing::warn!(
            deadline_secs = limits.deadline.as_secs_f64(),
            completed,
            requested,
            "batch deadline elapsed; dropping in-flight detail fetches"
        );
    }

    tracing::info!(
        found = precedents.len(),
        no_content,
        failed,
        "precedent retrieval complete"
    );

    RetrievalBatch {
        precedents,
        attempt_count: next_count,
    }
}

/// Trim keywords and drop blank ones, preserving order.
pub fn clean_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect()
}

fn skipped(attempt_count: u32) -> RetrievalBatch {
    tracing::warn!("no search keywords; skipping precedent search");
    RetrievalBatch::empty(attempt_count.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Precedent, ResolveOutcome};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Detail {
        Content,
        Empty,
        Broken,
        Slow,
    }

    #[derive(Default)]
    struct MockSource {
        resolved: Option<Result<Vec<&'static str>, u16>>,
        details: HashMap<&'static str, Detail>,
        fetch_delay: Duration,
        resolve_calls: AtomicUsize,
        resolved_keywords: Mutex<Vec<String>>,
        fetch_calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
    }

    impl MockSource {
        fn with_ids(ids: &[(&'static str, Detail)]) -> Self {
            Self {
                resolved: Some(Ok(ids.iter().map(|(id, _)| *id).collect())),
                details: ids.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    fn precedent(id: &str) -> Precedent {
        Precedent {
            precedent_no: id.to_owned(),
            case_id: "2020다1".into(),
            title: "손해배상".into(),
            start_page: "0".into(),
            content: format!("본문 {id}"),
            is_relevant: false,
        }
    }

    impl PrecedentSource for MockSource {
        async fn resolve(&self, keywords: &[String]) -> Result<ResolveOutcome, SearchError> {
            self.resolve_calls.fetch_add(1, Ordering::SeqCst);
            self.resolved_keywords.lock().unwrap().extend_from_slice(keywords);
            match &self.resolved {
                Some(Ok(ids)) if !ids.is_empty() => Ok(ResolveOutcome::Found(
                    ids.iter().map(|id| (*id).to_owned()).collect(),
                )),
                Some(Ok(_)) | None => Ok(ResolveOutcome::NoResults),
                Some(Err(status)) => Err(SearchError::Status(*status)),
            }
        }

        async fn fetch_detail(&self, precedent_no: &str) -> FetchOutcome {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

            let detail = self.details.get(precedent_no).copied().unwrap_or(Detail::Empty);
            let delay = match detail {
                Detail::Slow => Duration::from_secs(30),
                _ => self.fetch_delay,
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match detail {
                Detail::Content | Detail::Slow => FetchOutcome::Found(precedent(precedent_no)),
                Detail::Empty => FetchOutcome::NoContent,
                Detail::Broken => FetchOutcome::Failed(SearchError::Parse("bad body".into())),
            }
        }
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    fn limits() -> FanOutLimits {
        FanOutLimits::new(4, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn empty_keywords_skip_all_calls() {
        let source = MockSource::with_ids(&[("1", Detail::Content)]);
        let batch = retrieve(&source, &[], 2, limits()).await;
        assert!(batch.precedents.is_empty());
        assert_eq!(batch.attempt_count, 3);
        assert_eq!(source.resolve_calls.load(Ordering::SeqCst), 0);
        assert_eq!(source.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_keywords_count_as_empty() {
        let source = MockSource::with_ids(&[("1", Detail::Content)]);
        let batch = retrieve(&source, &keywords(&["  ", ""]), 0, limits()).await;
        assert_eq!(batch.attempt_count, 1);
        assert_eq!(source.resolve_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn source_receives_trimmed_keywords() {
        let source = MockSource::default();
        retrieve(&source, &keywords(&[" 손해배상 ", "", "과실 "]), 0, limits()).await;
        assert_eq!(*source.resolved_keywords.lock().unwrap(), keywords(&["손해배상", "과실"]));
    }

    #[tokio::test]
    async fn cleaned_keywords_are_forwarded_unchanged() {
        let source = MockSource::default();
        let cleaned = clean_keywords(&keywords(&["  불법행위 "]));
        let batch = retrieve_cleaned(&source, &cleaned, 3, limits()).await;
        assert_eq!(batch.attempt_count, 4);
        assert_eq!(*source.resolved_keywords.lock().unwrap(), cleaned);
        assert_eq!(source.resolve_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_ids_skips_fan_out() {
        let source = MockSource::default();
        let batch = retrieve(&source, &keywords(&["과실"]), 1, limits()).await;
        assert!(batch.precedents.is_empty());
        assert_eq!(batch.attempt_count, 2);
        assert_eq!(source.resolve_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn resolve_failure_increments_counter() {
        let source = MockSource {
            resolved: Some(Err(500)),
            ..Default::default()
        };
        let batch = retrieve(&source, &keywords(&["과실"]), 4, limits()).await;
        assert!(batch.precedents.is_empty());
        assert_eq!(batch.attempt_count, 5);
    }

    #[tokio::test]
    async fn one_fetch_per_id_and_absent_outcomes_dropped() {
        let source = MockSource::with_ids(&[
            ("123", Detail::Content),
            ("456", Detail::Empty),
            ("789", Detail::Broken),
            ("999", Detail::Content),
        ]);
        let batch = retrieve(&source, &keywords(&["손해배상", "과실"]), 0, limits()).await;

        assert_eq!(source.fetch_calls.load(Ordering::SeqCst), 4);
        assert_eq!(batch.attempt_count, 1);
        let mut ids: Vec<&str> = batch
            .precedents
            .iter()
            .map(|p| p.precedent_no.as_str())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["123", "999"]);
        assert!(batch.precedents.iter().all(|p| !p.content.is_empty()));
    }

    #[tokio::test]
    async fn fan_out_respects_concurrency_cap() {
        let ids: Vec<(&'static str, Detail)> = ["a", "b", "c", "d", "e", "f"]
            .into_iter()
            .map(|id| (id, Detail::Content))
            .collect();
        let source = MockSource {
            fetch_delay: Duration::from_millis(20),
            ..MockSource::with_ids(&ids)
        };
        let batch = retrieve(
            &source,
            &keywords(&["과실"]),
            0,
            FanOutLimits::new(2, Duration::from_secs(5)),
        )
        .await;

        assert_eq!(batch.precedents.len(), 6);
        assert!(source.peak_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn deadline_keeps_completed_records() {
        let source = MockSource::with_ids(&[("fast", Detail::Content), ("slow", Detail::Slow)]);
        let batch = retrieve(
            &source,
            &keywords(&["과실"]),
            7,
            FanOutLimits::new(4, Duration::from_millis(200)),
        )
        .await;

        assert_eq!(batch.attempt_count, 8);
        assert_eq!(batch.precedents.len(), 1);
        assert_eq!(batch.precedents[0].precedent_no, "fast");
    }

    #[tokio::test]
    async fn invalid_config_resets_counter() {
        let batch = run(&SearchConfig::default(), &keywords(&["과실"]), 9).await;
        assert!(batch.precedents.is_empty());
        assert_eq!(batch.attempt_count, 0);
    }

    #[tokio::test]
    async fn empty_keywords_skip_session_even_with_invalid_config() {
        let batch = run(&SearchConfig::default(), &[], 9).await;
        assert_eq!(batch.attempt_count, 10);
    }

    #[test]
    fn limits_clamp_zero_concurrency() {
        let limits = FanOutLimits::new(0, Duration::from_secs(1));
        assert_eq!(limits.max_in_flight, 1);
    }

    #[test]
    fn limits_from_config() {
        let config = SearchConfig {
            max_concurrent_fetches: 3,
            batch_deadline_seconds: 12,
            ..Default::default()
        };
        let limits = FanOutLimits::from(&config);
        assert_eq!(limits.max_in_flight, 3);
        assert_eq!(limits.deadline, Duration::from_secs(12));
    }

    #[test]
    fn clean_keywords_trims_and_drops_blanks() {
        let cleaned = clean_keywords(&keywords(&[" 손해배상 ", "", "과실", "   "]));
        assert_eq!(cleaned, vec!["손해배상", "과실"]);
    }
}
