//! ChatBackend trait definition.
//!
//! This is the port the relay talks to the inference backend through.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//! Implementations live in llamalink-infra (e.g., `OllamaBackend`).

use llamalink_types::error::RelayError;
use llamalink_types::wire::BackendChatRequest;

/// Trait for the LLM inference backend the relay forwards to.
pub trait ChatBackend: Send + Sync {
    /// Human-readable backend name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send a chat request and return the raw response body text.
    ///
    /// The body may contain several newline-delimited JSON records even
    /// for a non-streaming request; decoding it is the caller's concern
    /// (see [`crate::reconcile`]). Transport failures and timeouts map
    /// to [`RelayError::BackendUnavailable`], non-2xx statuses to
    /// [`RelayError::BackendStatus`].
    fn send_chat(
        &self,
        request: &BackendChatRequest,
    ) -> impl std::future::Future<Output = Result<String, RelayError>> + Send;

    /// Liveness probe. Any 2xx from the backend means reachable;
    /// everything else, including transport errors, is `false`.
    fn probe(&self) -> impl std::future::Future<Output = bool> + Send;
}
