use crate::candidate::Domain;
use crate::questionnaire::QuestionnaireAnswers;
use serde::{Deserialize, Serialize};

/// Prefix that marks reasoning text composed locally.
pub const LOCAL_REASONING_MARKER: &str = "[local]";

/// Synthesized final concept. Terminal output of the funnel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub personalized_for: QuestionnaireAnswers,
    /// 0 to 100.
    pub confidence: u8,
    #[serde(rename = "aiReasoning")]
    pub reasoning: String,
    #[serde(default)]
    pub key_features: Vec<String>,
    pub market_potential: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl Artifact {
    /// Whether this artifact came from the local fallback rather than the
    /// synthesis service.
    pub fn is_locally_generated(&self) -> bool {
        self.reasoning.starts_with(LOCAL_REASONING_MARKER)
    }
}
