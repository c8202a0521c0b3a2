use serde::{Deserialize, Serialize};
use std::fmt;

/// Page-level stage of the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
    Swipe,
    Selection,
    Ranking,
    Questionnaire,
    Synthesis,
}

impl FunnelStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swipe => "swipe",
            Self::Selection => "selection",
            Self::Ranking => "ranking",
            Self::Questionnaire => "questionnaire",
            Self::Synthesis => "synthesis",
        }
    }

    /// Stages that start (swipe) or end (synthesis) a cycle may clear every key.
    pub fn bounds_cycle(&self) -> bool {
        matches!(self, Self::Swipe | Self::Synthesis)
    }
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a value handed from one stage to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunnelKey {
    #[serde(rename = "accepted-items")]
    AcceptedItems,
    #[serde(rename = "shortlist-items")]
    ShortlistItems,
    #[serde(rename = "selected-items")]
    SelectedItems,
    #[serde(rename = "questionnaire-answers")]
    QuestionnaireAnswers,
}

impl FunnelKey {
    pub const ALL: [FunnelKey; 4] = [
        FunnelKey::AcceptedItems,
        FunnelKey::ShortlistItems,
        FunnelKey::SelectedItems,
        FunnelKey::QuestionnaireAnswers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptedItems => "accepted-items",
            Self::ShortlistItems => "shortlist-items",
            Self::SelectedItems => "selected-items",
            Self::QuestionnaireAnswers => "questionnaire-answers",
        }
    }

    pub fn parse(key: &str) -> Option<FunnelKey> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// The only stage allowed to write this key within a cycle.
    pub fn writer(&self) -> FunnelStage {
        match self {
            Self::AcceptedItems => FunnelStage::Swipe,
            Self::ShortlistItems => FunnelStage::Selection,
            Self::SelectedItems => FunnelStage::Ranking,
            Self::QuestionnaireAnswers => FunnelStage::Questionnaire,
        }
    }

    /// Earliest stage able to regenerate this key.
    pub fn recovery_stage(&self) -> FunnelStage {
        self.writer()
    }
}

impl fmt::Display for FunnelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
