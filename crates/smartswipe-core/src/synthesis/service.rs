use super::fallback::compose_fallback;
use super::model::Artifact;
use crate::error::{FunnelError, Result};
use crate::questionnaire::QuestionnaireAnswers;
use crate::selection::RankedSelection;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Remote service producing the final artifact.
#[async_trait]
pub trait SynthesisService: Send + Sync {
    async fn synthesize(&self, ranked: &RankedSelection, answers: &QuestionnaireAnswers) -> Result<Artifact>;
}

/// Synthesis adapter. Bounds the remote call with a timeout and recovers any
/// failure with the local composition, so it always produces an artifact.
#[derive(Clone)]
pub struct IdeaSynthesizer {
    service: Arc<dyn SynthesisService>,
    timeout: Duration,
}

impl IdeaSynthesizer {
    pub fn new(service: Arc<dyn SynthesisService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub async fn synthesize(&self, ranked: &RankedSelection, answers: &QuestionnaireAnswers) -> Artifact {
        let result = match tokio::time::timeout(self.timeout, self.service.synthesize(ranked, answers)).await {
            Ok(result) => result,
            Err(_) => Err(FunnelError::Timeout {
                operation: "synthesize".to_string(),
                millis: self.timeout.as_millis() as u64,
            }),
        };

        match result {
            Ok(artifact) => {
                tracing::info!("[Synthesis] Received artifact '{}'", artifact.title);
                artifact
            }
            Err(e) => {
                tracing::warn!("[Synthesis] Service failed, composing locally: {}", e);
                compose_fallback(ranked, answers)
            }
        }
    }
}
