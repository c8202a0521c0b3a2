//! Decision recorder trait.

use crate::candidate::CandidateId;
use crate::error::Result;
use async_trait::async_trait;

/// Remote service that persists swipe decisions.
///
/// The session calls this fire-and-forget: progression never waits on it, but
/// a returned error is reported back as a `DecisionPersistFailed` alert.
#[async_trait]
pub trait DecisionRecorder: Send + Sync {
    async fn record_decision(&self, item_id: &CandidateId, accepted: bool) -> Result<()>;
}
