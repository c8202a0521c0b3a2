use crate::client::ApiClient;
use crate::dto::SwipeRequest;
use async_trait::async_trait;
use smartswipe_core::candidate::CandidateId;
use smartswipe_core::error::{FunnelError, Result};
use smartswipe_core::session::DecisionRecorder;

const SWIPES_PATH: &str = "/api/swipes/";

/// Decision recorder backed by the swipes API.
#[derive(Debug, Clone)]
pub struct HttpDecisionRecorder {
    client: ApiClient,
}

impl HttpDecisionRecorder {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DecisionRecorder for HttpDecisionRecorder {
    async fn record_decision(&self, item_id: &CandidateId, accepted: bool) -> Result<()> {
        let body = SwipeRequest {
            idea_id: item_id.as_str(),
            swipe: accepted,
        };
        self.client
            .post_for_status(SWIPES_PATH, Some(&body))
            .await
            .map_err(|e| FunnelError::decision_persist_failed(item_id.as_str(), e.to_string()))
    }
}
