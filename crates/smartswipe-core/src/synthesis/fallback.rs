use super::model::{Artifact, LOCAL_REASONING_MARKER};
use crate::questionnaire::QuestionnaireAnswers;
use crate::selection::RankedSelection;

/// Confidence reported for a locally composed artifact.
pub const FALLBACK_CONFIDENCE: u8 = 60;
pub const FALLBACK_ARTIFACT_ID: &str = "final-fallback";
const MAX_TAGS: usize = 6;

/// Composes an artifact locally from the ranked items and answers.
///
/// Pure: the same inputs always produce the same artifact.
pub fn compose_fallback(ranked: &RankedSelection, answers: &QuestionnaireAnswers) -> Artifact {
    let top = ranked.first();

    let mut tags: Vec<String> = Vec::new();
    for tag in ranked.items().iter().flat_map(|item| item.tags.iter()) {
        if tags.len() == MAX_TAGS {
            break;
        }
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }

    let tokens: Vec<&str> = top.title.split_whitespace().collect();
    let subject = tokens[tokens.len().saturating_sub(2)..].join(" ");
    let focus = tags.iter().take(3).map(String::as_str).collect::<Vec<_>>().join(", ");

    Artifact {
        id: FALLBACK_ARTIFACT_ID.to_string(),
        title: format!("AI-Powered {subject} Revolution"),
        description: format!("A personalized solution using {focus}."),
        domain: top.domain.clone(),
        tags,
        personalized_for: answers.clone(),
        confidence: FALLBACK_CONFIDENCE,
        reasoning: format!(
            "{LOCAL_REASONING_MARKER} Generated locally because the synthesis service was unavailable."
        ),
        key_features: vec![
            format!("AI-powered {} analysis", top.domain.label().to_lowercase()),
            "Personalized UX".to_string(),
            "Scalable architecture".to_string(),
            "API integrations".to_string(),
        ],
        market_potential: "Medium".to_string(),
        saved_at: None,
    }
}
