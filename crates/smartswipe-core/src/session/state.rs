//! Swipe session states.

use crate::gate::GateVerdict;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a session entered the error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    PoolUnavailable,
    DecisionPersistFailed,
}

/// State of a swipe session.
///
/// `Loading → Active ⇄ Checkpoint`, `Active → Exhausted`, any state `→ Error`.
/// `Error` is left only through an explicit retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Loading,
    Active,
    /// Periodic pause. `verdict` is the checkpoint gate result for the
    /// accepted count at the time the checkpoint fired.
    Checkpoint { accepted: usize, verdict: GateVerdict },
    /// No item left at the cursor. `can_leave` reports the stage-exit gate.
    Exhausted { can_leave: bool },
    Error { reason: ErrorReason },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Active => "active",
            Self::Checkpoint { .. } => "checkpoint",
            Self::Exhausted { .. } => "exhausted",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
