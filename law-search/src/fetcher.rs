//! Precedent detail retrieval via the detail endpoint.

use crate::api::DetailResponse;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::html;
use crate::http;
use crate::resolver::{RESPONSE_TYPE, TARGET_PRECEDENT};
use crate::types::{FetchOutcome, Precedent, START_PAGE_SENTINEL, UNKNOWN};

/// Fetch one precedent, or `None` if it is unavailable or has no body text.
///
/// Failures are logged at error level with the identifier; missing content
/// is an expected outcome and is not.
pub async fn fetch_detail(
    client: &reqwest::Client,
    config: &SearchConfig,
    precedent_no: &str,
) -> Option<Precedent> {
    fetch_outcome(client, config, precedent_no)
        .await
        .into_precedent()
}

/// Fetch one precedent and report why it is absent, if it is.
pub async fn fetch_outcome(
    client: &reqwest::Client,
    config: &SearchConfig,
    precedent_no: &str,
) -> FetchOutcome {
    let params = [
        ("OC", config.credential.as_str()),
        ("target", TARGET_PRECEDENT),
        ("ID", precedent_no),
        ("type", RESPONSE_TYPE),
    ];

    match http::get_json(client, &config.service_url, &params).await {
        Ok(body) => parse_detail_response(precedent_no, body),
        Err(e) => {
            tracing::error!(precedent_no, error = %e, "precedent detail request failed");
            FetchOutcome::Failed(e)
        }
    }
}

/// Build a [`Precedent`] from a parsed detail response.
///
/// The body is the first non-empty of holding summary, issues summary and
/// full decision text, run through [`html::normalize`]. A missing or blank
/// detail object, no body, or a body that normalizes to nothing yields
/// [`FetchOutcome::NoContent`].
pub(crate) fn parse_detail_response(precedent_no: &str, body: serde_json::Value) -> FetchOutcome {
    if !body.is_object() {
        tracing::error!(precedent_no, "detail response is not a JSON object");
        return FetchOutcome::Failed(SearchError::Parse("detail response is not a JSON object".into()));
    }
    let response: DetailResponse = match serde_json::from_value(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(precedent_no, error = %e, "detail response has an unexpected shape");
            return FetchOutcome::Failed(SearchError::Parse(e.to_string()));
        }
    };

    let service = match response.service() {
        Ok(Some(service)) => service,
        Ok(None) => {
            tracing::debug!(precedent_no, "precedent has no detail object");
            return FetchOutcome::NoContent;
        }
        Err(e) => {
            tracing::error!(precedent_no, error = %e, "detail response has an unexpected shape");
            return FetchOutcome::Failed(SearchError::Parse(e));
        }
    };
    let Some(raw) = service.body() else {
        tracing::debug!(precedent_no, "precedent has no body text");
        return FetchOutcome::NoContent;
    };

    let content = html::normalize(raw);
    if content.is_empty() {
        tracing::debug!(precedent_no, "precedent body is empty after cleanup");
        return FetchOutcome::NoContent;
    }

    FetchOutcome::Found(Precedent {
        precedent_no: precedent_no.to_owned(),
        case_id: service.case_number.unwrap_or_else(|| UNKNOWN.to_owned()),
        title: service.case_name.unwrap_or_else(|| UNKNOWN.to_owned()),
        start_page: START_PAGE_SENTINEL.to_owned(),
        content,
        is_relevant: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn found(outcome: FetchOutcome) -> Precedent {
        match outcome {
            FetchOutcome::Found(p) => p,
            other => panic!("expected a precedent, got {other:?}"),
        }
    }

    #[test]
    fn builds_record_from_holding_summary() {
        let precedent = found(parse_detail_response(
            "123",
            json!({"PrecService": {
                "사건번호": "2020다12345",
                "사건명": "손해배상(기)",
                "판결요지": "<br/>판결요지: &lt;손해&gt;   배상",
                "판결내용": "전문"
            }}),
        ));
        assert_eq!(precedent.precedent_no, "123");
        assert_eq!(precedent.case_id, "2020다12345");
        assert_eq!(precedent.title, "손해배상(기)");
        assert_eq!(precedent.start_page, "0");
        assert_eq!(precedent.content, "판결요지: <손해> 배상");
        assert!(!precedent.is_relevant);
    }

    #[test]
    fn falls_back_to_issues_then_full_text() {
        let precedent = found(parse_detail_response(
            "1",
            json!({"PrecService": {"판결요지": "", "판시사항": "쟁점"}}),
        ));
        assert_eq!(precedent.content, "쟁점");

        let precedent = found(parse_detail_response(
            "2",
            json!({"PrecService": {"판결내용": "<p>주문</p>"}}),
        ));
        assert_eq!(precedent.content, "주문");
    }

    #[test]
    fn missing_metadata_defaults_to_unknown() {
        let precedent = found(parse_detail_response(
            "5",
            json!({"PrecService": {"판결요지": "요지"}}),
        ));
        assert_eq!(precedent.case_id, "Unknown");
        assert_eq!(precedent.title, "Unknown");
    }

    #[test]
    fn empty_service_object_is_no_content() {
        let outcome = parse_detail_response("456", json!({"PrecService": {}}));
        assert!(matches!(outcome, FetchOutcome::NoContent));
    }

    #[test]
    fn missing_service_object_is_no_content() {
        let outcome = parse_detail_response("456", json!({}));
        assert!(matches!(outcome, FetchOutcome::NoContent));
    }

    #[test]
    fn all_body_fields_missing_is_no_content() {
        let outcome = parse_detail_response(
            "7",
            json!({"PrecService": {"사건번호": "2020도1", "사건명": "사기"}}),
        );
        assert!(matches!(outcome, FetchOutcome::NoContent));
    }

    #[test]
    fn markup_only_body_is_no_content() {
        let outcome = parse_detail_response("8", json!({"PrecService": {"판결요지": "<br/> <b></b>"}}));
        assert!(matches!(outcome, FetchOutcome::NoContent));
    }

    #[test]
    fn blank_service_values_are_no_content() {
        for raw in [json!(""), json!([]), json!(false), json!(null), json!(0)] {
            let outcome = parse_detail_response("10", json!({"PrecService": raw}));
            assert!(matches!(outcome, FetchOutcome::NoContent), "{outcome:?}");
        }
    }

    #[test]
    fn unexpected_shape_is_failure() {
        let outcome = parse_detail_response("9", json!({"PrecService": "not an object"}));
        assert!(matches!(outcome, FetchOutcome::Failed(SearchError::Parse(_))));

        let outcome = parse_detail_response("11", json!({"PrecService": ["2020다1", "손해배상", "요지"]}));
        assert!(matches!(outcome, FetchOutcome::Failed(SearchError::Parse(_))));

        let outcome = parse_detail_response("12", json!([{"판결요지": "요지"}]));
        assert!(matches!(outcome, FetchOutcome::Failed(SearchError::Parse(_))));
    }
}
