//! Progression gate.
//!
//! A pure rule deciding whether the accepted count permits leaving a stage.

use serde::{Deserialize, Serialize};

/// Minimum accepted items to proceed from a checkpoint.
pub const CHECKPOINT_MINIMUM: usize = 5;
/// Minimum accepted items to move on to the selection stage.
pub const STAGE_EXIT_MINIMUM: usize = 3;

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum GateVerdict {
    Allow,
    /// `deficit` more accepted items are required.
    Deny { deficit: usize },
}

impl GateVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn deficit(&self) -> usize {
        match self {
            Self::Allow => 0,
            Self::Deny { deficit } => *deficit,
        }
    }
}

/// Evaluates `accepted_count` against `minimum_required`.
pub fn evaluate(accepted_count: usize, minimum_required: usize) -> GateVerdict {
    if accepted_count >= minimum_required {
        GateVerdict::Allow
    } else {
        GateVerdict::Deny {
            deficit: minimum_required - accepted_count,
        }
    }
}
