use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use sdix_intent::{IntentEvent, MatchResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Browser events that cancel a pending safety redirect.
pub(super) const CANCEL_EVENTS: &[&str] = &["mousemove", "keydown", "click"];

#[derive(Debug, Deserialize)]
pub(super) struct IntentQuery {
    pub q: Option<String>,
}

/// Redirect hint for the search page. The page owns the timer and listeners.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct SafetyRedirect {
    pub path: String,
    pub delay_ms: u64,
    pub cancel_on: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub(super) struct IntentResponse {
    #[serde(flatten)]
    pub result: MatchResult,
    pub redirect: Option<SafetyRedirect>,
}

pub(super) async fn get_intent(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<IntentQuery>,
) -> Json<ApiResponse<IntentResponse>> {
    let data = classify(&state, query.q.as_deref());
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Accepts `{"query": ...}`. A missing or non-string `query` is classified as
/// absent input rather than rejected.
pub(super) async fn post_intent(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<IntentResponse>>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected intent payload");
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })?;

    let data = classify(&state, body.get("query").and_then(Value::as_str));
    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn classify(state: &AppState, query: Option<&str>) -> IntentResponse {
    let result = state.matcher.classify(query);

    if state.analytics_enabled {
        if let Some(event) = IntentEvent::from_result(&result) {
            event.emit();
        }
    }

    let redirect = safety_redirect(state, &result);
    IntentResponse { result, redirect }
}

fn safety_redirect(state: &AppState, result: &MatchResult) -> Option<SafetyRedirect> {
    if !result.is_match() {
        return None;
    }

    state
        .matcher
        .rule()
        .safety_path
        .as_ref()
        .map(|path| SafetyRedirect {
            path: path.clone(),
            delay_ms: state.redirect_delay_ms,
            cancel_on: CANCEL_EVENTS,
        })
}
