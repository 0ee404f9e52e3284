//! Response reconciliation: one reply string from a multi-record body.
//!
//! Even when asked for a single non-streaming answer, the backend may
//! emit several newline-delimited JSON records in one response body.
//! Decoding is decode-or-discard: blank lines are skipped, a line that
//! fails to decode is dropped with a debug log and never aborts the
//! rest. The decoded records are then resolved into one reply according
//! to the configured [`ReconcileMode`].

use llamalink_types::config::ReconcileMode;
use llamalink_types::wire::BackendReplyRecord;

/// Reply used when reconciliation finds nothing usable in the body.
pub const NO_REPLY_PLACEHOLDER: &str = "no reply from model";

/// Decode a response body into its reply records.
///
/// Blank lines are skipped; undecodable lines are discarded
/// individually.
pub fn decode_records(body: &str) -> Vec<BackendReplyRecord> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::debug!(error = %err, "discarding undecodable reply record");
                None
            }
        })
        .collect()
}

/// Resolve decoded records into a single reply string.
///
/// Falls back to [`NO_REPLY_PLACEHOLDER`] when no record qualifies
/// under the given mode.
pub fn resolve_reply(mode: ReconcileMode, records: &[BackendReplyRecord]) -> String {
    let reply = match mode {
        ReconcileMode::AccumulateThinking => records
            .iter()
            .filter(|r| !r.done)
            .filter_map(|r| r.message.thinking.as_deref())
            .collect::<String>(),
        ReconcileMode::LastDoneWins => records
            .iter()
            .filter(|r| r.done && !r.message.content.trim().is_empty())
            .next_back()
            .map(|r| r.message.content.clone())
            .unwrap_or_default(),
    };

    if reply.trim().is_empty() {
        NO_REPLY_PLACEHOLDER.to_string()
    } else {
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Vec<BackendReplyRecord> {
        decode_records(body)
    }

    #[test]
    fn test_decode_skips_blank_and_bad_lines() {
        let body = concat!(
            r#"{"model":"m","message":{"role":"assistant","content":"a"},"done":false}"#,
            "\n\n",
            "not json at all\n",
            r#"{"model":"m","message":{"role":"assistant","content":"b"},"done":true}"#,
            "\n",
        );
        let records = decode(body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message.content, "a");
        assert_eq!(records[1].message.content, "b");
    }

    #[test]
    fn test_accumulate_thinking_concatenates_in_order() {
        let body = concat!(
            r#"{"model":"m","message":{"role":"assistant","thinking":"Hel"},"done":false}"#,
            "\n",
            r#"{"model":"m","message":{"role":"assistant","thinking":"lo"},"done":false}"#,
            "\n",
            r#"{"model":"m","message":{"role":"assistant","content":"ignored"},"done":true}"#,
        );
        let records = decode(body);
        let reply = resolve_reply(ReconcileMode::AccumulateThinking, &records);
        assert_eq!(reply, "Hello");
    }

    #[test]
    fn test_last_done_wins_keeps_final_done_record() {
        let body = concat!(
            r#"{"model":"m","message":{"role":"assistant","content":"first"},"done":true}"#,
            "\n",
            r#"{"model":"m","message":{"role":"assistant","content":""},"done":false}"#,
            "\n",
            r#"{"model":"m","message":{"role":"assistant","content":"final"},"done":true}"#,
        );
        let records = decode(body);
        let reply = resolve_reply(ReconcileMode::LastDoneWins, &records);
        assert_eq!(reply, "final");
    }

    #[test]
    fn test_last_done_wins_skips_blank_done_content() {
        let body = concat!(
            r#"{"model":"m","message":{"role":"assistant","content":"kept"},"done":true}"#,
            "\n",
            r#"{"model":"m","message":{"role":"assistant","content":"   "},"done":true}"#,
        );
        let records = decode(body);
        let reply = resolve_reply(ReconcileMode::LastDoneWins, &records);
        assert_eq!(reply, "kept");
    }

    #[test]
    fn test_empty_body_yields_placeholder_in_both_modes() {
        for mode in [ReconcileMode::AccumulateThinking, ReconcileMode::LastDoneWins] {
            let reply = resolve_reply(mode, &decode(""));
            assert_eq!(reply, NO_REPLY_PLACEHOLDER);
        }
    }

    #[test]
    fn test_undecodable_body_yields_placeholder() {
        let records = decode("garbage\nmore garbage\n");
        assert!(records.is_empty());
        let reply = resolve_reply(ReconcileMode::LastDoneWins, &records);
        assert_eq!(reply, NO_REPLY_PLACEHOLDER);
    }

    #[test]
    fn test_accumulate_thinking_ignores_done_record_thinking() {
        let body = concat!(
            r#"{"model":"m","message":{"role":"assistant","thinking":"keep"},"done":false}"#,
            "\n",
            r#"{"model":"m","message":{"role":"assistant","thinking":"drop","content":"x"},"done":true}"#,
        );
        let records = decode(body);
        let reply = resolve_reply(ReconcileMode::AccumulateThinking, &records);
        assert_eq!(reply, "keep");
    }
}
