//! Wire types for the Ollama `/api/chat` protocol.
//!
//! Kept separate from the domain types in [`crate::chat`]: these structs
//! mirror what actually goes over HTTP, including the backend's habit of
//! answering a non-streaming request with several newline-delimited JSON
//! records in one body.

use serde::{Deserialize, Serialize};

use crate::chat::{Turn, TurnRole};

/// A message as carried on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: TurnRole,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}

impl From<&Turn> for WireMessage {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            content: turn.content.clone(),
            thinking: turn.thinking.clone(),
        }
    }
}

/// Request body for `POST {base_url}/api/chat`.
///
/// `stream` is always sent as `false` by the relay; the backend may
/// still legally answer with multiple records per body.
#[derive(Debug, Clone, Serialize)]
pub struct BackendChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub stream: bool,
}

impl BackendChatRequest {
    /// Build a non-streaming request from a full transcript.
    pub fn from_transcript(model: impl Into<String>, transcript: &[Turn]) -> Self {
        Self {
            model: model.into(),
            messages: transcript.iter().map(WireMessage::from).collect(),
            stream: false,
        }
    }
}

/// One decoded unit of a backend response body.
///
/// Response bodies are zero or more of these, newline-separated. A line
/// that fails to decode is discarded individually, never fatal.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendReplyRecord {
    #[serde(default)]
    pub model: String,
    pub message: WireMessage,
    #[serde(default)]
    pub done: bool,
}
