//! Wire payloads of the SmartSwipe backend.

use serde::{Deserialize, Serialize};
use smartswipe_core::candidate::CandidateItem;
use smartswipe_core::questionnaire::QuestionnaireAnswers;

/// `GET /api/ideas/game-session` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GameSessionResponse {
    pub ideas: Vec<CandidateItem>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub total_available: usize,
}

/// `POST /api/swipes/` body.
#[derive(Debug, Serialize)]
pub struct SwipeRequest<'a> {
    pub idea_id: &'a str,
    pub swipe: bool,
}

/// `POST /api/ideas/generate-final` body.
#[derive(Debug, Serialize)]
pub struct FinalIdeaRequest<'a> {
    pub top_ideas: &'a [CandidateItem],
    pub questionnaire: &'a QuestionnaireAnswers,
}
