use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::{SettingsError, SettingsStore, SettingsUpdate};
use crate::storage::KeyValueStore;

/// Router builder exposing the settings singleton. The API key never leaves in responses;
/// a `PUT` carrying the masked key back leaves the stored key untouched.
pub fn settings_router<B>(store: Arc<SettingsStore<B>>) -> Router
where
    B: KeyValueStore + ?Sized + 'static,
{
    Router::new()
        .route(
            "/api/v1/settings",
            get(show_handler::<B>).put(save_handler::<B>),
        )
        .with_state(store)
}

pub(crate) async fn show_handler<B>(State(store): State<Arc<SettingsStore<B>>>) -> Response
where
    B: KeyValueStore + ?Sized + 'static,
{
    (StatusCode::OK, axum::Json(store.load().redacted())).into_response()
}

pub(crate) async fn save_handler<B>(
    State(store): State<Arc<SettingsStore<B>>>,
    axum::Json(update): axum::Json<SettingsUpdate>,
) -> Response
where
    B: KeyValueStore + ?Sized + 'static,
{
    match store.update(update) {
        Ok(saved) => (StatusCode::OK, axum::Json(saved.redacted())).into_response(),
        Err(error) => {
            let status = match error {
                SettingsError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SettingsError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let payload = json!({ "error": error.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}
