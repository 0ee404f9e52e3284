//! Relay configuration types.
//!
//! Deserialized from an optional `config.toml` and overridable from the
//! environment (see `llamalink-infra`). Every field has a documented
//! default so an empty file, or no file at all, yields a working
//! configuration pointed at a local Ollama instance.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How a multi-record backend response body is reconciled into one reply.
///
/// Both strategies were observed against real backends and produce
/// materially different output for identical traffic, so the choice is
/// explicit configuration, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileMode {
    /// Concatenate the `thinking` text of every record with `done ==
    /// false`, in record order. Suited to reasoning models that put the
    /// useful output in the thinking channel.
    AccumulateThinking,
    /// Keep the `content` of the last record with `done == true` and
    /// non-blank content.
    LastDoneWins,
}

impl Default for ReconcileMode {
    fn default() -> Self {
        ReconcileMode::LastDoneWins
    }
}

impl fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileMode::AccumulateThinking => write!(f, "accumulate_thinking"),
            ReconcileMode::LastDoneWins => write!(f, "last_done_wins"),
        }
    }
}

impl FromStr for ReconcileMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accumulate_thinking" => Ok(ReconcileMode::AccumulateThinking),
            "last_done_wins" => Ok(ReconcileMode::LastDoneWins),
            other => Err(format!("invalid reconcile mode: '{other}'")),
        }
    }
}

/// Connection settings for the inference backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used when a request does not name one.
    #[serde(default = "default_model")]
    pub model: String,
    /// Connection establishment timeout.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Full request/response completion timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Socket idle timeout.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

impl BackendConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "qwen2.5:1.5b".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_idle_timeout_secs() -> u64 {
    120
}

/// Top-level relay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub reconcile_mode: ReconcileMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_mode_roundtrip() {
        for mode in [ReconcileMode::AccumulateThinking, ReconcileMode::LastDoneWins] {
            let s = mode.to_string();
            let parsed: ReconcileMode = s.parse().unwrap();
            assert_eq!(mode, parsed);
        }
    }

    #[test]
    fn test_reconcile_mode_serde() {
        let json = serde_json::to_string(&ReconcileMode::LastDoneWins).unwrap();
        assert_eq!(json, "\"last_done_wins\"");
        let parsed: ReconcileMode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ReconcileMode::LastDoneWins);
    }

    #[test]
    fn test_backend_config_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "qwen2.5:1.5b");
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.idle_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_relay_config_from_empty_toml() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.reconcile_mode, ReconcileMode::LastDoneWins);
        assert_eq!(config.backend.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_relay_config_partial_toml() {
        let config: RelayConfig = toml::from_str(
            r#"
reconcile_mode = "accumulate_thinking"

[backend]
model = "qwen3:4b"
"#,
        )
        .unwrap();
        assert_eq!(config.reconcile_mode, ReconcileMode::AccumulateThinking);
        assert_eq!(config.backend.model, "qwen3:4b");
        // Unspecified fields keep their defaults.
        assert_eq!(config.backend.request_timeout_secs, 120);
    }
}
