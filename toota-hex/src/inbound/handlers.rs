//! HTTP request handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use toota_types::{DatabaseProbe, ProbeError, Settings};

/// How long the readiness probe waits for the database.
const READY_TIMEOUT: Duration = Duration::from_secs(2);

/// Application state shared across handlers.
pub struct AppState<D: DatabaseProbe> {
    pub settings: Arc<Settings>,
    pub database: D,
}

/// JSON error body shared by handlers and middleware.
pub(crate) fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({
        "error": message.into(),
        "code": status.as_u16()
    });

    (status, Json(body)).into_response()
}

/// Liveness check. Never touches the database.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Readiness check: the database must answer.
#[tracing::instrument(skip(state))]
pub async fn ready<D: DatabaseProbe>(State(state): State<Arc<AppState<D>>>) -> Response {
    let result = match tokio::time::timeout(READY_TIMEOUT, state.database.ping()).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout),
    };

    match result {
        Ok(()) => Json(serde_json::json!({
            "status": "ready",
            "profile": state.settings.profile,
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
