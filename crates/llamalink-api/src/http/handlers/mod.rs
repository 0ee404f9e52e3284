//! HTTP request handlers.

pub mod chat;
pub mod health;
pub mod info;

use axum::http::HeaderMap;

use llamalink_core::relay::DEFAULT_SESSION;

/// Session identifier from the `X-Session-ID` header.
///
/// An absent or non-UTF-8 header selects the shared default session.
pub fn session_id_from(headers: &HeaderMap) -> String {
    headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .to_string()
}
