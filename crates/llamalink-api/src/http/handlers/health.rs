//! Health endpoint.
//!
//! GET /health -- 200 when the backend probe succeeds, 503 otherwise.
//! The handler itself never fails; unreachability is data, not an
//! error.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ollama_connected: bool,
    pub timestamp: i64,
}

/// GET /health -- backend reachability as a status code plus body.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let connected = state.relay.check_health().await;
    let (code, status) = if connected {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            status,
            ollama_connected: connected,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }),
    )
}
