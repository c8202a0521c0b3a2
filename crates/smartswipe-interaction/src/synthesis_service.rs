use crate::client::ApiClient;
use crate::dto::FinalIdeaRequest;
use async_trait::async_trait;
use smartswipe_core::error::{FunnelError, Result};
use smartswipe_core::questionnaire::QuestionnaireAnswers;
use smartswipe_core::selection::RankedSelection;
use smartswipe_core::synthesis::{Artifact, SynthesisService};

const GENERATE_FINAL_PATH: &str = "/api/ideas/generate-final";

/// Synthesis service backed by the final-idea API.
#[derive(Debug, Clone)]
pub struct HttpSynthesisService {
    client: ApiClient,
}

impl HttpSynthesisService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SynthesisService for HttpSynthesisService {
    async fn synthesize(&self, ranked: &RankedSelection, answers: &QuestionnaireAnswers) -> Result<Artifact> {
        let body = FinalIdeaRequest {
            top_ideas: ranked.items(),
            questionnaire: answers,
        };
        self.client
            .post_json(GENERATE_FINAL_PATH, &body)
            .await
            .map_err(|e| match e {
                FunnelError::Timeout { .. } => e,
                other => FunnelError::SynthesisFailed(other.to_string()),
            })
    }
}
