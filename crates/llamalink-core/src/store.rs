//! In-memory conversation store.
//!
//! Owns the mapping from session identifier to an ordered transcript of
//! turns. Pure in-memory state with no I/O. Individual operations are
//! atomic via the concurrent map; serializing a whole chat exchange
//! (append, backend call, append-or-rollback) is the relay's job.

use dashmap::DashMap;

use llamalink_types::chat::Turn;

/// Per-session conversation transcripts.
///
/// Entries are created lazily on first use and persist for the lifetime
/// of the process. `clear` empties a transcript in place; the session
/// identifier remains registered and never expires.
#[derive(Debug, Default)]
pub struct ConversationStore {
    transcripts: DashMap<String, Vec<Turn>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the session's transcript, creating the
    /// transcript if absent.
    pub fn append(&self, session_id: &str, turn: Turn) {
        self.transcripts
            .entry(session_id.to_string())
            .or_default()
            .push(turn);
    }

    /// Full ordered snapshot of the session's transcript.
    ///
    /// Returns an empty sequence for an unknown session.
    pub fn transcript_of(&self, session_id: &str) -> Vec<Turn> {
        self.transcripts
            .get(session_id)
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// Remove the most recently appended turn.
    ///
    /// Used exclusively for rollback after a failed backend call. No-op
    /// on an empty or unknown transcript; that should not occur in
    /// correct usage but must not fail.
    pub fn remove_last_turn(&self, session_id: &str) {
        if let Some(mut transcript) = self.transcripts.get_mut(session_id) {
            transcript.pop();
        }
    }

    /// Empty the session's transcript in place.
    pub fn clear(&self, session_id: &str) {
        if let Some(mut transcript) = self.transcripts.get_mut(session_id) {
            transcript.clear();
        }
    }

    /// Number of turns currently in the session's transcript.
    pub fn len(&self, session_id: &str) -> usize {
        self.transcripts
            .get(session_id)
            .map(|t| t.len())
            .unwrap_or(0)
    }

    /// Number of registered sessions.
    pub fn session_count(&self) -> usize {
        self.transcripts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llamalink_types::chat::TurnRole;

    #[test]
    fn test_append_creates_transcript_lazily() {
        let store = ConversationStore::new();
        assert_eq!(store.session_count(), 0);

        store.append("s1", Turn::user("Hi"));
        assert_eq!(store.session_count(), 1);
        assert_eq!(store.len("s1"), 1);
    }

    #[test]
    fn test_transcript_of_unknown_session_is_empty() {
        let store = ConversationStore::new();
        assert!(store.transcript_of("nope").is_empty());
    }

    #[test]
    fn test_transcript_preserves_order() {
        let store = ConversationStore::new();
        store.append("s1", Turn::user("Hi"));
        store.append("s1", Turn::assistant("Hello!"));

        let transcript = store.transcript_of("s1");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, TurnRole::User);
        assert_eq!(transcript[1].role, TurnRole::Assistant);
    }

    #[test]
    fn test_remove_last_turn() {
        let store = ConversationStore::new();
        store.append("s1", Turn::user("Hi"));
        store.append("s1", Turn::user("Again"));
        store.remove_last_turn("s1");

        let transcript = store.transcript_of("s1");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].content, "Hi");
    }

    #[test]
    fn test_remove_last_turn_on_empty_is_noop() {
        let store = ConversationStore::new();
        store.remove_last_turn("unknown");

        store.append("s1", Turn::user("Hi"));
        store.remove_last_turn("s1");
        store.remove_last_turn("s1");
        assert_eq!(store.len("s1"), 0);
    }

    #[test]
    fn test_clear_keeps_session_registered() {
        let store = ConversationStore::new();
        store.append("s1", Turn::user("Hi"));
        store.clear("s1");

        assert_eq!(store.len("s1"), 0);
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = ConversationStore::new();
        store.append("a", Turn::user("for a"));
        store.append("b", Turn::user("for b"));
        store.clear("a");

        assert_eq!(store.len("a"), 0);
        assert_eq!(store.len("b"), 1);
        assert_eq!(store.transcript_of("b")[0].content, "for b");
    }
}
