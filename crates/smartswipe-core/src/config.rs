//! Engine configuration model.
//!
//! Every field has a default, so a partial (or empty) `config.toml` is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the funnel engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default tracing level when `RUST_LOG` is not set.
    pub log_level: String,
    pub gesture: GestureSettings,
    pub session: SessionSettings,
    pub selection: SelectionSettings,
    pub synthesis: SynthesisSettings,
    pub api: ApiSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            gesture: GestureSettings::default(),
            session: SessionSettings::default(),
            selection: SelectionSettings::default(),
            synthesis: SynthesisSettings::default(),
            api: ApiSettings::default(),
        }
    }
}

/// Thresholds and animation curve parameters for drag gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Minimum absolute displacement that resolves a decision.
    pub distance_threshold: f64,
    /// Minimum absolute velocity that resolves a decision.
    pub velocity_threshold: f64,
    /// Rotation reached at `rotation_span` displacement, in degrees.
    pub max_rotation_deg: f64,
    pub rotation_span: f64,
    /// Displacement at which the card starts fading out.
    pub fade_start: f64,
    /// Displacement at which the card is fully transparent.
    pub fade_end: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            distance_threshold: 100.0,
            velocity_threshold: 0.5,
            max_rotation_deg: 30.0,
            rotation_span: 300.0,
            fade_start: 150.0,
            fade_end: 300.0,
        }
    }
}

/// Swipe session tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub initial_pool_size: usize,
    /// A checkpoint is raised every `checkpoint_interval` decisions.
    pub checkpoint_interval: usize,
    /// Replenish when fewer than this many items remain ahead of the cursor.
    pub replenish_threshold: usize,
    /// Accepted items required to proceed from a checkpoint.
    pub checkpoint_minimum: usize,
    /// Accepted items required to leave an exhausted session.
    pub stage_exit_minimum: usize,
    pub pool_load_timeout_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            initial_pool_size: 15,
            checkpoint_interval: 10,
            replenish_threshold: 3,
            checkpoint_minimum: crate::gate::CHECKPOINT_MINIMUM,
            stage_exit_minimum: crate::gate::STAGE_EXIT_MINIMUM,
            pool_load_timeout_ms: 10_000,
        }
    }
}

impl SessionSettings {
    pub fn pool_load_timeout(&self) -> Duration {
        Duration::from_millis(self.pool_load_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Upper bound of the broad selection shortlist.
    pub broad_capacity: usize,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            broad_capacity: crate::selection::BROAD_SELECTION_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    pub timeout_ms: u64,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self { timeout_ms: 30_000 }
    }
}

impl SynthesisSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Remote backend settings used by the HTTP adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// Session token issued by the (external) auth layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    pub request_timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            bearer_token: None,
            request_timeout_ms: 15_000,
        }
    }
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
