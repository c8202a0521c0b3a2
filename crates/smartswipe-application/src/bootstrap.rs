//! Wiring of the production collaborators.

use crate::context::FunnelContext;
use crate::telemetry::{FunnelEventLayer, init_tracing};
use anyhow::{Result, anyhow};
use smartswipe_core::config::EngineConfig;
use smartswipe_core::funnel::FunnelStore;
use smartswipe_infrastructure::{ConfigService, FileFunnelStore};
use smartswipe_interaction::{ApiClient, HttpDecisionRecorder, HttpItemSource, HttpSynthesisService};
use std::path::PathBuf;
use std::sync::Arc;

/// Options for [`bootstrap`].
#[derive(Default)]
pub struct BootstrapOptions {
    /// Config file; defaults to the platform config path.
    pub config_path: Option<PathBuf>,
    /// Funnel state directory; defaults to the platform data path.
    pub funnel_dir: Option<PathBuf>,
    /// Installs a [`FunnelEventLayer`] alongside the fmt subscriber.
    pub events: Option<FunnelEventLayer>,
}

/// Loads configuration, installs tracing, and builds the HTTP-backed context.
pub fn bootstrap(options: BootstrapOptions) -> Result<FunnelContext> {
    let config_service = match options.config_path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let config = config_service.get_config();
    init_tracing(&config.log_level, options.events);

    let store = match options.funnel_dir {
        Some(dir) => FileFunnelStore::new(dir),
        None => FileFunnelStore::default_location()
            .map_err(|e| anyhow!("Failed to resolve funnel state directory: {}", e))?,
    };
    tracing::info!("[Bootstrap] Funnel state stored in {:?}", store.dir());
    tracing::info!("[Bootstrap] Backend at {}", config.api.base_url);

    Ok(http_context(config, Arc::new(store)))
}

/// Builds a context whose remote collaborators talk to `config.api`.
pub fn http_context(config: EngineConfig, store: Arc<dyn FunnelStore>) -> FunnelContext {
    let client = ApiClient::from_settings(&config.api);
    FunnelContext::new(
        config,
        store,
        Arc::new(HttpItemSource::new(client.clone())),
        Arc::new(HttpDecisionRecorder::new(client.clone())),
        Arc::new(HttpSynthesisService::new(client)),
    )
}
