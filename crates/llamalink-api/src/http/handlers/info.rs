//! Service info endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::json;

use crate::state::AppState;

/// GET /api/info -- service metadata and effective configuration.
pub async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "Llamalink Chat Relay",
        "version": env!("CARGO_PKG_VERSION"),
        "backend_url": state.config.backend.base_url,
        "default_model": state.config.backend.model,
        "reconcile_mode": state.config.reconcile_mode.to_string(),
    }))
}
