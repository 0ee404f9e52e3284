//! Relay service: one user message in, one reconciled reply out.
//!
//! Orchestrates a chat exchange with all-or-nothing effect on
//! conversation state: append the user turn, call the backend,
//! reconcile the response, append the assistant turn -- or roll the
//! user turn back if anything between the two appends fails (including
//! the caller abandoning the request mid-call).

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use llamalink_types::chat::Turn;
use llamalink_types::config::ReconcileMode;
use llamalink_types::error::RelayError;
use llamalink_types::wire::BackendChatRequest;

use crate::backend::ChatBackend;
use crate::reconcile::{decode_records, resolve_reply};
use crate::store::ConversationStore;

/// Session used when the caller does not supply an identifier.
pub const DEFAULT_SESSION: &str = "default";

/// Removes the most recently appended turn unless committed.
///
/// Armed right after the user turn is appended, defused right after the
/// assistant turn is appended. Dropping it any other way -- an error
/// return or the future being cancelled -- rolls the transcript back to
/// its pre-call state.
struct RollbackGuard<'a> {
    store: &'a ConversationStore,
    session_id: &'a str,
    armed: bool,
}

impl<'a> RollbackGuard<'a> {
    fn arm(store: &'a ConversationStore, session_id: &'a str) -> Self {
        Self {
            store,
            session_id,
            armed: true,
        }
    }

    fn commit(mut self) {
        self.armed = false;
    }
}

impl Drop for RollbackGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.store.remove_last_turn(self.session_id);
            warn!(session_id = %self.session_id, "rolled back user turn after failed exchange");
        }
    }
}

/// Orchestrates chat exchanges against a [`ChatBackend`].
///
/// Generic over the backend trait so the infra implementation stays out
/// of this crate. Holds the injected conversation store and a lock map
/// that serializes exchanges per session; different sessions proceed
/// fully in parallel. Locks are acquired per session with no nesting,
/// so no deadlock is possible.
pub struct RelayService<B: ChatBackend> {
    backend: B,
    store: ConversationStore,
    session_locks: DashMap<String, Arc<Mutex<()>>>,
    default_model: String,
    mode: ReconcileMode,
}

impl<B: ChatBackend> RelayService<B> {
    pub fn new(backend: B, default_model: impl Into<String>, mode: ReconcileMode) -> Self {
        Self {
            backend,
            store: ConversationStore::new(),
            session_locks: DashMap::new(),
            default_model: default_model.into(),
            mode,
        }
    }

    /// The model used when a request does not name one.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// The configured reconciliation mode.
    pub fn reconcile_mode(&self) -> ReconcileMode {
        self.mode
    }

    /// Read-only snapshot of a session's transcript.
    pub fn transcript_of(&self, session_id: &str) -> Vec<Turn> {
        self.store.transcript_of(session_id)
    }

    /// Turn one user message into one reply.
    ///
    /// A successful call appends exactly two turns (user then
    /// assistant) to the session's transcript; a failed call appends
    /// zero. Blank messages are rejected before any state change or
    /// network call.
    pub async fn chat(
        &self,
        session_id: &str,
        message: &str,
        model: Option<&str>,
    ) -> Result<String, RelayError> {
        if message.trim().is_empty() {
            return Err(RelayError::EmptyMessage);
        }

        let model = model.unwrap_or(&self.default_model);

        // Serialize exchanges per session. The lock arc is cloned out of
        // the map so no map shard stays locked across the await points.
        let lock = self
            .session_locks
            .entry(session_id.to_string())
            .or_default()
            .clone();
        let _exchange = lock.lock().await;

        self.store.append(session_id, Turn::user(message));
        let guard = RollbackGuard::arm(&self.store, session_id);

        let transcript = self.store.transcript_of(session_id);
        let request = BackendChatRequest::from_transcript(model, &transcript);

        debug!(
            session_id,
            model,
            turns = transcript.len(),
            backend = self.backend.name(),
            "forwarding transcript to backend"
        );

        let body = self.backend.send_chat(&request).await?;

        let records = decode_records(&body);
        let reply = resolve_reply(self.mode, &records);

        info!(
            session_id,
            model,
            records = records.len(),
            reply_chars = reply.len(),
            "exchange complete"
        );

        self.store.append(session_id, Turn::assistant(reply.clone()));
        guard.commit();

        Ok(reply)
    }

    /// Empty the session's transcript. Always succeeds.
    pub fn clear_history(&self, session_id: &str) {
        self.store.clear(session_id);
        info!(session_id, "conversation history cleared");
    }

    /// Whether the backend is currently reachable.
    ///
    /// Never fails; transport errors and non-2xx statuses both report
    /// `false`.
    pub async fn check_health(&self) -> bool {
        self.backend.probe().await
    }
}
