//! Stage activation and navigation results.

use smartswipe_core::error::{FunnelError, Result};
use smartswipe_core::funnel::{FunnelKey, FunnelStage};

/// Result of entering a stage.
#[derive(Debug)]
pub enum StageActivation<T> {
    /// Inputs were present and valid.
    Ready(T),
    /// A required input was missing or malformed; navigate here instead.
    Redirect(FunnelStage),
}

impl<T> StageActivation<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn redirect_target(&self) -> Option<FunnelStage> {
        match self {
            Self::Ready(_) => None,
            Self::Redirect(stage) => Some(*stage),
        }
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Redirect(_) => None,
        }
    }
}

/// Result of a "continue" action inside a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Output written; navigate to the given stage.
    To(FunnelStage),
    /// Progress within the current stage.
    Stay,
    /// Refused with a message for the user. Nothing was written.
    Blocked(String),
}

/// Turns a missing-state failure into a redirect to the key's recovery stage.
/// Any other error is passed through.
pub(crate) fn route<T>(stage: FunnelStage, result: Result<T>) -> Result<StageActivation<T>> {
    match result {
        Ok(value) => Ok(StageActivation::Ready(value)),
        Err(FunnelError::FunnelStateMissing { key, reason }) => {
            let target = FunnelKey::parse(&key)
                .map(|k| k.recovery_stage())
                .unwrap_or(FunnelStage::Swipe);
            tracing::info!(
                "[Funnel] {} cannot start ({}: {}), redirecting to {}",
                stage,
                key,
                reason,
                target
            );
            Ok(StageActivation::Redirect(target))
        }
        Err(e) => Err(e),
    }
}
