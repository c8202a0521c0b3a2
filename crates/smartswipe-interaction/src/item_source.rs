use crate::client::ApiClient;
use crate::dto::GameSessionResponse;
use async_trait::async_trait;
use smartswipe_core::candidate::{CandidateItem, ItemSource, SourceError};

const GAME_SESSION_PATH: &str = "/api/ideas/game-session";
const GENERATE_POOL_PATH: &str = "/api/ideas/generate-pool";

/// Item source backed by the ideas API.
#[derive(Debug, Clone)]
pub struct HttpItemSource {
    client: ApiClient,
}

impl HttpItemSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ItemSource for HttpItemSource {
    async fn fetch_pool(&self, limit: usize) -> Result<Vec<CandidateItem>, SourceError> {
        let response: GameSessionResponse = self
            .client
            .get_json(GAME_SESSION_PATH, &[("limit", limit.to_string())])
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        tracing::debug!(
            "[HttpItemSource] Received {} idea(s), {} available",
            response.ideas.len(),
            response.total_available
        );
        if response.ideas.is_empty() {
            return Err(SourceError::Empty);
        }
        Ok(response.ideas)
    }

    async fn request_generation(&self) -> Result<(), SourceError> {
        self.client
            .post_for_status::<()>(GENERATE_POOL_PATH, None)
            .await
            .map_err(|e| SourceError::Network(e.to_string()))
    }
}
