use crate::infra::{AppState, Stores};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use recruit_ai::settings::settings_router;
use recruit_ai::workflows::candidates::candidate_router;
use recruit_ai::workflows::interviews::{interview_review_router, interview_router};
use recruit_ai::workflows::screening::screening_router;
use serde_json::json;

/// Workflow routers merged with the operational endpoints.
pub(crate) fn with_workflow_routes(stores: &Stores) -> Router {
    candidate_router(stores.candidates.clone())
        .merge(screening_router(stores.screening.clone()))
        .merge(settings_router(stores.settings.clone()))
        .merge(interview_router(stores.interviews.clone()))
        .merge(interview_review_router(stores.reviewer.clone()))
        .route("/api/v1/dashboard", axum::routing::get(dashboard_endpoint))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .layer(Extension(stores.clone()))
}

pub(crate) async fn dashboard_endpoint(Extension(stores): Extension<Stores>) -> impl IntoResponse {
    (StatusCode::OK, Json(stores.dashboard()))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use recruit_ai::storage::MemoryStore;
    use recruit_ai::workflows::interviews::InterviewRequest;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool) -> (Router, Stores) {
        let stores = Stores::open(Arc::new(MemoryStore::new()));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        (with_workflow_routes(&stores).layer(Extension(state)), stores)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        let (router, _) = app(false);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");

        let state = AppState {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        state.readiness.store(true, Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn candidate_flow_through_merged_router() {
        let (router, stores) = app(true);

        let created = router
            .clone()
            .oneshot(
                Request::post("/api/v1/candidates")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "name": "Grace Hopper",
                            "email": "grace@navy.mil",
                            "role": "DevOps Engineer",
                            "resumeText": "Docker and Kubernetes, Docker again, Terraform"
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(created.status(), StatusCode::CREATED);
        let candidate = json_body(created).await;
        let id = candidate["id"].as_str().expect("id").to_string();

        let screened = router
            .clone()
            .oneshot(
                Request::post(format!("/api/v1/candidates/{id}/screening"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(screened.status(), StatusCode::OK);

        let summary = router
            .oneshot(
                Request::get("/api/v1/pipeline/summary")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(summary.status(), StatusCode::OK);
        assert_eq!(json_body(summary).await["total"], 1);

        let stored = stores.candidates.list(&Default::default());
        assert!(stored[0].score.is_some());
    }

    #[tokio::test]
    async fn settings_round_trip_hides_api_key() {
        let (router, _) = app(true);

        let saved = router
            .clone()
            .oneshot(
                Request::put("/api/v1/settings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "apiKey": "sk-live", "cutoffScore": 80, "autoEmail": true })
                            .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(saved.status(), StatusCode::OK);

        let shown = router
            .oneshot(Request::get("/api/v1/settings").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let body = json_body(shown).await;
        assert_eq!(body["cutoffScore"], 80);
        assert_eq!(body["apiKey"], "********");
    }

    #[tokio::test]
    async fn dashboard_reports_interviews_and_average_score() {
        let (router, stores) = app(true);
        stores
            .interviews
            .schedule(InterviewRequest::new(
                "Ada Lovelace",
                "ada@x.com",
                "2025-03-14",
                "09:30",
            ))
            .expect("booked");

        let response = router
            .oneshot(Request::get("/api/v1/dashboard").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["interviewsScheduled"], 1);
        assert_eq!(body["pipeline"]["total"], 0);
        assert!(body["pipeline"]["averageScore"].is_null());
    }

    #[tokio::test]
    async fn interview_analysis_is_reachable_through_merged_router() {
        let (router, _) = app(true);

        let response = router
            .oneshot(
                Request::post("/api/v1/interviews/analysis")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "candidateName": "Ada Lovelace",
                            "transcript": "Interviewer: How do you handle retries?\n\
                                           Candidate: Idempotency keys on every request, \
                                           exponential backoff with jitter, and a dead letter queue."
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["analysis"]["overallScore"], 100);
        assert_eq!(body["verdict"]["cutoff"], 75);
        assert_eq!(body["verdict"]["selected"], true);
    }

    #[tokio::test]
    async fn settings_put_with_masked_key_keeps_it() {
        let (router, stores) = app(true);
        stores
            .settings
            .update(recruit_ai::settings::SettingsUpdate {
                api_key: Some("sk-live".to_string()),
                ..Default::default()
            })
            .expect("seed");

        let response = router
            .oneshot(
                Request::put("/api/v1/settings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "apiKey": "********", "cutoffScore": 85, "autoEmail": false })
                            .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(stores.settings.load().api_key, "sk-live");
        assert_eq!(stores.settings.load().cutoff_score, 85);
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_text() {
        let (router, _) = app(true);
        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
