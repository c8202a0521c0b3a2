//! Error types for the SmartSwipe funnel engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire funnel engine.
///
/// Transport failures are translated into one of these variants at the
/// adapter boundary, so state-machine code only ever sees the funnel
/// taxonomy and never a raw HTTP or file-system error.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FunnelError {
    /// The item source produced no candidates, even after one generation request.
    #[error("Candidate pool unavailable: {0}")]
    PoolUnavailable(String),

    /// The remote decision recorder did not confirm a decision.
    #[error("Failed to persist decision for item '{item_id}': {message}")]
    DecisionPersistFailed { item_id: String, message: String },

    /// The synthesis service failed. Recovered by the local fallback.
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// A stage's required funnel key is absent or malformed.
    #[error("Funnel state missing: {key} ({reason})")]
    FunnelStateMissing { key: String, reason: String },

    /// A stage attempted to write a key owned by another stage.
    #[error("Stage '{stage}' is not the writer of funnel key '{key}'")]
    WriterViolation { key: String, stage: String },

    /// An operation was requested in a session state that does not allow it.
    #[error("Invalid transition: cannot {action} while {state}")]
    InvalidTransition { state: String, action: String },

    /// Network or remote service error
    #[error("Transport error: {0}")]
    Transport(String),

    /// A bounded operation exceeded its time limit
    #[error("Timed out after {millis}ms: {operation}")]
    Timeout { operation: String, millis: u64 },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FunnelError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a PoolUnavailable error
    pub fn pool_unavailable(message: impl Into<String>) -> Self {
        Self::PoolUnavailable(message.into())
    }

    /// Creates a DecisionPersistFailed error
    pub fn decision_persist_failed(item_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DecisionPersistFailed {
            item_id: item_id.into(),
            message: message.into(),
        }
    }

    /// Creates a FunnelStateMissing error
    pub fn state_missing(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FunnelStateMissing {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(state: impl Into<String>, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            state: state.into(),
            action: action.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a PoolUnavailable error
    pub fn is_pool_unavailable(&self) -> bool {
        matches!(self, Self::PoolUnavailable(_))
    }

    /// Check if this is a FunnelStateMissing error
    pub fn is_state_missing(&self) -> bool {
        matches!(self, Self::FunnelStateMissing { .. })
    }

    /// Check if this is a Timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this error came from the remote side (transport or timeout).
    ///
    /// These are the failures the synthesis adapter recovers from with the
    /// local fallback.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::SynthesisFailed(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FunnelError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FunnelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FunnelError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for FunnelError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<tokio::time::error::Elapsed> for FunnelError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::Timeout {
            operation: "unspecified".to_string(),
            millis: 0,
        }
    }
}

/// Conversion from anyhow::Error (used by bootstrap glue)
impl From<anyhow::Error> for FunnelError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, FunnelError>`.
pub type Result<T> = std::result::Result<T, FunnelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_missing_predicate() {
        let err = FunnelError::state_missing("accepted-items", "absent");
        assert!(err.is_state_missing());
        assert!(!err.is_pool_unavailable());
        assert_eq!(
            err.to_string(),
            "Funnel state missing: accepted-items (absent)"
        );
    }

    #[test]
    fn test_remote_failure_classification() {
        assert!(FunnelError::transport("connection refused").is_remote_failure());
        assert!(
            FunnelError::Timeout {
                operation: "synthesize".to_string(),
                millis: 10
            }
            .is_remote_failure()
        );
        assert!(!FunnelError::config("bad").is_remote_failure());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: FunnelError = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert!(matches!(err, FunnelError::Serialization { ref format, .. } if format == "JSON"));
    }
}
