use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::analysis::{AnalysisError, AnalysisProvider};
use super::notification::Mailer;
use super::service::{ScreeningError, ScreeningRequest, ScreeningService};
use crate::storage::KeyValueStore;
use crate::workflows::candidates::router::store_error_response;
use crate::workflows::candidates::CandidateId;

pub fn screening_router<P, M, B>(service: Arc<ScreeningService<P, M, B>>) -> Router
where
    P: AnalysisProvider + ?Sized + 'static,
    M: Mailer + ?Sized + 'static,
    B: KeyValueStore + ?Sized + 'static,
{
    Router::new()
        .route(
            "/api/v1/candidates/:candidate_id/screening",
            post(screen_handler::<P, M, B>),
        )
        .with_state(service)
}

pub(crate) async fn screen_handler<P, M, B>(
    State(service): State<Arc<ScreeningService<P, M, B>>>,
    Path(candidate_id): Path<String>,
    axum::Json(request): axum::Json<ScreeningRequest>,
) -> Response
where
    P: AnalysisProvider + ?Sized + 'static,
    M: Mailer + ?Sized + 'static,
    B: KeyValueStore + ?Sized + 'static,
{
    match service.screen(&CandidateId(candidate_id), request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(ScreeningError::Candidates(error)) => store_error_response(error),
        Err(ScreeningError::Analysis(error)) => {
            let status = match error {
                AnalysisError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                AnalysisError::EmptyResume | AnalysisError::UnknownRole(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            };
            let payload = json!({ "error": error.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}
