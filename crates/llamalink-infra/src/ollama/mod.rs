//! OllamaBackend -- concrete [`ChatBackend`] implementation for Ollama.
//!
//! Sends chat requests to `/api/chat` and probes `/api/tags` for
//! liveness. The client is built with three independent timeouts
//! (connect, full request, socket idle) taken from [`BackendConfig`].

use llamalink_core::backend::ChatBackend;
use llamalink_types::config::BackendConfig;
use llamalink_types::error::RelayError;
use llamalink_types::wire::BackendChatRequest;

/// Ollama inference backend client.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaBackend {
    /// Create a new backend client from connection settings.
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .read_timeout(config.idle_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ChatBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn send_chat(&self, request: &BackendChatRequest) -> Result<String, RelayError> {
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RelayError::BackendStatus {
                status: status.as_u16(),
                message,
            });
        }

        response
            .text()
            .await
            .map_err(|e| RelayError::BackendUnavailable(e.to_string()))
    }

    async fn probe(&self) -> bool {
        match self.client.get(self.url("/api/tags")).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, "backend probe failed");
                false
            }
        }
    }
}
