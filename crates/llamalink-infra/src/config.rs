//! Relay configuration loader.
//!
//! Reads `config.toml` from the given path and deserializes it into
//! [`RelayConfig`], falling back to defaults when the file is missing
//! or malformed. Environment variables `OLLAMA_URL` and `OLLAMA_MODEL`
//! override the backend section last, so a container deployment can
//! point the relay at a different backend without editing the file.

use std::path::Path;

use llamalink_types::config::RelayConfig;

/// Load relay configuration from a `config.toml` path.
///
/// - If the file does not exist, returns [`RelayConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns
///   the default.
/// - `OLLAMA_URL` and `OLLAMA_MODEL` override the backend settings in
///   all cases.
pub async fn load_config(path: &Path) -> RelayConfig {
    let mut config = read_config_file(path).await;
    apply_env_overrides(&mut config);
    config
}

async fn read_config_file(path: &Path) -> RelayConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return RelayConfig::default();
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {err}, using defaults", path.display());
            return RelayConfig::default();
        }
    };

    match toml::from_str::<RelayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to parse {}: {err}, using defaults", path.display());
            RelayConfig::default()
        }
    }
}

fn apply_env_overrides(config: &mut RelayConfig) {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            config.backend.base_url = url.trim_end_matches('/').to_string();
        }
    }
    if let Ok(model) = std::env::var("OLLAMA_MODEL") {
        if !model.trim().is_empty() {
            config.backend.model = model;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llamalink_types::config::ReconcileMode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn read_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config_file(&tmp.path().join("config.toml")).await;
        assert_eq!(config.backend.base_url, "http://localhost:11434");
        assert_eq!(config.reconcile_mode, ReconcileMode::LastDoneWins);
    }

    #[tokio::test]
    async fn read_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
reconcile_mode = "accumulate_thinking"

[backend]
base_url = "http://ollama.internal:11434"
model = "qwen3:4b"
request_timeout_secs = 300
"#,
        )
        .await
        .unwrap();

        let config = read_config_file(&path).await;
        assert_eq!(config.backend.base_url, "http://ollama.internal:11434");
        assert_eq!(config.backend.model, "qwen3:4b");
        assert_eq!(config.backend.request_timeout_secs, 300);
        assert_eq!(config.backend.connect_timeout_secs, 30);
        assert_eq!(config.reconcile_mode, ReconcileMode::AccumulateThinking);
    }

    #[tokio::test]
    async fn read_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = read_config_file(&path).await;
        assert_eq!(config.backend.model, "qwen2.5:1.5b");
    }
}
