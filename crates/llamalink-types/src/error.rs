use thiserror::Error;

/// Errors surfaced by the relay.
///
/// Per-record decode failures inside an otherwise successful response
/// body are not represented here: they are skipped (with a debug log)
/// during reconciliation and never become errors. Health-check failures
/// are reported as a boolean, never as an error.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The user message was blank. Rejected before any state change or
    /// network call.
    #[error("message must not be empty")]
    EmptyMessage,

    /// The backend could not be reached: connection failure or timeout.
    /// The user turn has been rolled back by the time this surfaces.
    #[error("backend unreachable: {0}")]
    BackendUnavailable(String),

    /// The backend responded with a non-success status. The user turn
    /// has been rolled back by the time this surfaces.
    #[error("backend returned HTTP {status}: {message}")]
    BackendStatus { status: u16, message: String },
}
