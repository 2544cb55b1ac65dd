use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::analysis::{InterviewAnalysisError, InterviewAnalysisRequest, InterviewAnalyzer};
use super::book::{InterviewBook, InterviewError};
use super::domain::InterviewRequest;
use super::review::InterviewReviewer;
use crate::storage::KeyValueStore;

pub fn interview_router<B>(book: Arc<InterviewBook<B>>) -> Router
where
    B: KeyValueStore + ?Sized + 'static,
{
    Router::new()
        .route(
            "/api/v1/interviews",
            get(list_handler::<B>).post(schedule_handler::<B>),
        )
        .with_state(book)
}

/// `POST /api/v1/interviews/analysis`: transcript in, analysis plus cutoff verdict out.
pub fn interview_review_router<A, B>(reviewer: Arc<InterviewReviewer<A, B>>) -> Router
where
    A: InterviewAnalyzer + ?Sized + 'static,
    B: KeyValueStore + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/interviews/analysis", post(review_handler::<A, B>))
        .with_state(reviewer)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InterviewQuery {
    #[serde(default)]
    email: Option<String>,
}

pub(crate) async fn list_handler<B>(
    State(book): State<Arc<InterviewBook<B>>>,
    Query(query): Query<InterviewQuery>,
) -> Response
where
    B: KeyValueStore + ?Sized + 'static,
{
    let email = query.email.as_deref().filter(|email| !email.trim().is_empty());
    (StatusCode::OK, axum::Json(book.list(email))).into_response()
}

pub(crate) async fn schedule_handler<B>(
    State(book): State<Arc<InterviewBook<B>>>,
    axum::Json(request): axum::Json<InterviewRequest>,
) -> Response
where
    B: KeyValueStore + ?Sized + 'static,
{
    match book.schedule(request) {
        Ok(interview) => (StatusCode::CREATED, axum::Json(interview)).into_response(),
        Err(error) => {
            let status = match &error {
                InterviewError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                InterviewError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let payload = json!({ "error": error.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn review_handler<A, B>(
    State(reviewer): State<Arc<InterviewReviewer<A, B>>>,
    axum::Json(request): axum::Json<InterviewAnalysisRequest>,
) -> Response
where
    A: InterviewAnalyzer + ?Sized + 'static,
    B: KeyValueStore + ?Sized + 'static,
{
    match reviewer.review(&request) {
        Ok(review) => (StatusCode::OK, axum::Json(review)).into_response(),
        Err(error) => {
            let status = match &error {
                InterviewAnalysisError::EmptyTranscript | InterviewAnalysisError::NoQuestions => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                InterviewAnalysisError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            };
            let payload = json!({ "error": error.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}
