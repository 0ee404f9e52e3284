//! Application state wiring the relay to its concrete backend.
//!
//! The relay service is generic over the backend trait; AppState pins
//! it to [`OllamaBackend`] and is what both the HTTP handlers and the
//! REPL hold.

use std::path::Path;
use std::sync::Arc;

use llamalink_core::relay::RelayService;
use llamalink_infra::config::load_config;
use llamalink_infra::ollama::OllamaBackend;
use llamalink_types::config::{ReconcileMode, RelayConfig};

/// The relay pinned to the concrete backend implementation.
pub type ConcreteRelay = RelayService<OllamaBackend>;

/// Shared state for HTTP handlers and the REPL.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelay>,
    pub config: RelayConfig,
}

impl AppState {
    /// Load configuration and construct the relay.
    pub async fn init(
        config_path: &Path,
        mode_override: Option<ReconcileMode>,
    ) -> anyhow::Result<Self> {
        let mut config = load_config(config_path).await;
        if let Some(mode) = mode_override {
            config.reconcile_mode = mode;
        }

        tracing::info!(
            backend_url = %config.backend.base_url,
            model = %config.backend.model,
            reconcile_mode = %config.reconcile_mode,
            "relay configured"
        );

        let backend = OllamaBackend::new(&config.backend)?;
        let relay = RelayService::new(
            backend,
            config.backend.model.clone(),
            config.reconcile_mode,
        );

        Ok(Self {
            relay: Arc::new(relay),
            config,
        })
    }
}
