//! Chat and clear-history endpoints.
//!
//! POST /api/chat  -- relay one message, session selected by the
//! `X-Session-ID` header.
//! POST /api/clear -- empty the selected session's transcript.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::error::AppError;
use crate::http::handlers::session_id_from;
use crate::state::AppState;

/// Request body for `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatApiRequest {
    /// The user message to relay.
    pub message: String,
    /// Model override; the configured default when absent.
    pub model: Option<String>,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatApiResponse {
    pub response: String,
    pub model: String,
}

/// POST /api/chat -- one user message in, one reconciled reply out.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ChatApiRequest>,
) -> Result<Json<ChatApiResponse>, AppError> {
    let session_id = session_id_from(&headers);
    let model = body
        .model
        .clone()
        .unwrap_or_else(|| state.relay.default_model().to_string());

    let response = state
        .relay
        .chat(&session_id, &body.message, body.model.as_deref())
        .await?;

    Ok(Json(ChatApiResponse { response, model }))
}

/// POST /api/clear -- empty the selected session's transcript.
pub async fn clear(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let session_id = session_id_from(&headers);
    state.relay.clear_history(&session_id);
    Json(json!({ "message": "conversation history cleared" }))
}
