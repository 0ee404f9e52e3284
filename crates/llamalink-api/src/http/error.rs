//! Application error type mapping relay failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use llamalink_types::error::RelayError;

/// Application-level error that maps to HTTP responses.
///
/// Rollback has already happened inside the relay by the time one of
/// these reaches a handler; this type only decides the status code and
/// body shape.
#[derive(Debug)]
pub enum AppError {
    Relay(RelayError),
    Internal(String),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Relay(RelayError::EmptyMessage) => (
                StatusCode::BAD_REQUEST,
                "BadRequest",
                "message must not be empty".to_string(),
            ),
            AppError::Relay(e @ RelayError::BackendUnavailable(_)) => {
                (StatusCode::BAD_GATEWAY, "BackendUnavailable", e.to_string())
            }
            AppError::Relay(e @ RelayError::BackendStatus { .. }) => {
                (StatusCode::BAD_GATEWAY, "BackendError", e.to_string())
            }
            AppError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                message.clone(),
            ),
        };

        (
            status,
            Json(json!({
                "error": code,
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_maps_to_bad_request() {
        let response = AppError::from(RelayError::EmptyMessage).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_backend_errors_map_to_bad_gateway() {
        let response =
            AppError::from(RelayError::BackendUnavailable("refused".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::from(RelayError::BackendStatus {
            status: 500,
            message: "boom".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_maps_to_server_error() {
        let response = AppError::Internal("handler panicked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
