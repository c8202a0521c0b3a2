//! Configuration service implementation.
//!
//! Loads the engine configuration from `config.toml` in the platform config
//! directory (`~/.config/smartswipe/config.toml` on Linux).

use crate::paths::SmartSwipePaths;
use crate::storage::AtomicFile;
use smartswipe_core::config::EngineConfig;
use smartswipe_core::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Loads and caches the engine configuration.
///
/// A missing or unparsable file yields the defaults; nothing is written back
/// unless [`ConfigService::save`] is called.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit file location. `None` resolves the platform path on load.
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<EngineConfig>>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses `path` instead of the platform config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> EngineConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[ConfigService] Using default configuration: {}", e);
                EngineConfig::default()
            }
        };

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Writes `config` to the config file and refreshes the cache.
    pub fn save(&self, config: &EngineConfig) -> Result<()> {
        let content = toml::to_string_pretty(config)?;
        AtomicFile::new(self.config_path()?).save(&content)?;

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(config.clone());
        Ok(())
    }

    fn load_config(&self) -> Result<EngineConfig> {
        let path = self.config_path()?;
        match AtomicFile::new(path.clone()).load()? {
            Some(content) => {
                let config = toml::from_str(&content)?;
                tracing::debug!("[ConfigService] Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(EngineConfig::default()),
        }
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(SmartSwipePaths::config_file()?),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
