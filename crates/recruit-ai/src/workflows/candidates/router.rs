use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateDraft, CandidateFilter, CandidateId, CandidateStatus, StatusFilter};
use super::store::{CandidateStore, CandidateStoreError};
use crate::storage::KeyValueStore;

/// Router builder exposing intake, listing, and status endpoints.
pub fn candidate_router<B>(store: Arc<CandidateStore<B>>) -> Router
where
    B: KeyValueStore + ?Sized + 'static,
{
    Router::new()
        .route(
            "/api/v1/candidates",
            post(create_handler::<B>).get(list_handler::<B>),
        )
        .route("/api/v1/candidates/:candidate_id", get(show_handler::<B>))
        .route(
            "/api/v1/candidates/:candidate_id/status",
            put(status_handler::<B>),
        )
        .route("/api/v1/pipeline/summary", get(summary_handler::<B>))
        .with_state(store)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    status: CandidateStatus,
}

pub(crate) async fn create_handler<B>(
    State(store): State<Arc<CandidateStore<B>>>,
    axum::Json(draft): axum::Json<CandidateDraft>,
) -> Response
where
    B: KeyValueStore + ?Sized + 'static,
{
    match store.create(draft) {
        Ok(candidate) => (StatusCode::CREATED, axum::Json(candidate)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn list_handler<B>(
    State(store): State<Arc<CandidateStore<B>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    B: KeyValueStore + ?Sized + 'static,
{
    let status = match query.status.as_deref() {
        None => StatusFilter::All,
        Some(raw) => match raw.parse::<StatusFilter>() {
            Ok(filter) => filter,
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
    };

    let filter = CandidateFilter {
        search_text: query.search.filter(|text| !text.is_empty()),
        status,
    };
    (StatusCode::OK, axum::Json(store.list(&filter))).into_response()
}

pub(crate) async fn show_handler<B>(
    State(store): State<Arc<CandidateStore<B>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    B: KeyValueStore + ?Sized + 'static,
{
    match store.get(&CandidateId(candidate_id)) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn status_handler<B>(
    State(store): State<Arc<CandidateStore<B>>>,
    Path(candidate_id): Path<String>,
    axum::Json(update): axum::Json<StatusUpdate>,
) -> Response
where
    B: KeyValueStore + ?Sized + 'static,
{
    match store.update_status(&CandidateId(candidate_id), update.status) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn summary_handler<B>(State(store): State<Arc<CandidateStore<B>>>) -> Response
where
    B: KeyValueStore + ?Sized + 'static,
{
    (StatusCode::OK, axum::Json(store.summary())).into_response()
}

pub(crate) fn store_error_response(error: CandidateStoreError) -> Response {
    let status = match &error {
        CandidateStoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CandidateStoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CandidateStoreError::InvalidTransition { .. } => StatusCode::CONFLICT,
        CandidateStoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
