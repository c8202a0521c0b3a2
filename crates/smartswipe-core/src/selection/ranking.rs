use super::RANKING_SIZE;
use super::broad::ToggleOutcome;
use crate::candidate::{CandidateId, CandidateItem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rank badge for a position in a submitted ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub const ORDER: [Medal; RANKING_SIZE] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    /// Medal for a zero-based rank position.
    pub fn for_rank(rank: usize) -> Option<Medal> {
        Self::ORDER.get(rank).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }
}

/// Why a ranking submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionRejected {
    #[error("need {0} more")]
    NeedMore(usize),
    #[error("remove {0}")]
    RemoveExtra(usize),
}

/// Exactly [`RANKING_SIZE`] items in rank order.
///
/// Only constructed through [`TopKRanking::submit`] or a length-checked
/// conversion, so the length invariant always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CandidateItem>", into = "Vec<CandidateItem>")]
pub struct RankedSelection(Vec<CandidateItem>);

impl RankedSelection {
    pub fn items(&self) -> &[CandidateItem] {
        &self.0
    }

    pub fn entries(&self) -> impl Iterator<Item = (Medal, &CandidateItem)> {
        Medal::ORDER.into_iter().zip(self.0.iter())
    }

    pub fn first(&self) -> &CandidateItem {
        &self.0[0]
    }
}

impl TryFrom<Vec<CandidateItem>> for RankedSelection {
    type Error = SubmissionRejected;

    fn try_from(items: Vec<CandidateItem>) -> Result<Self, Self::Error> {
        match items.len() {
            n if n < RANKING_SIZE => Err(SubmissionRejected::NeedMore(RANKING_SIZE - n)),
            n if n > RANKING_SIZE => Err(SubmissionRejected::RemoveExtra(n - RANKING_SIZE)),
            _ => Ok(Self(items)),
        }
    }
}

impl From<RankedSelection> for Vec<CandidateItem> {
    fn from(ranked: RankedSelection) -> Self {
        ranked.0
    }
}

/// Ordered pick of exactly [`RANKING_SIZE`] items. Pick order is rank order.
#[derive(Debug, Clone)]
pub struct TopKRanking {
    candidates: Vec<CandidateItem>,
    picks: Vec<CandidateId>,
}

impl TopKRanking {
    pub fn new(candidates: Vec<CandidateItem>) -> Self {
        Self {
            candidates,
            picks: Vec::new(),
        }
    }

    /// Starts from an existing pick list, e.g. a broad shortlist carried over
    /// from the previous stage. Unknown and repeated ids are dropped. The seed
    /// may exceed the ranking size; submission then asks to remove the extra.
    pub fn with_picks(candidates: Vec<CandidateItem>, picks: &[CandidateId]) -> Self {
        let mut ranking = Self::new(candidates);
        for id in picks {
            if ranking.is_candidate(id) && !ranking.picks.contains(id) {
                ranking.picks.push(id.clone());
            }
        }
        ranking
    }

    /// Adds the item at the next rank if below the ranking size, removes it
    /// (shifting later ranks up) if already picked.
    pub fn toggle(&mut self, id: &CandidateId) -> ToggleOutcome {
        if let Some(position) = self.picks.iter().position(|p| p == id) {
            self.picks.remove(position);
            return ToggleOutcome::Removed;
        }
        if !self.is_candidate(id) {
            return ToggleOutcome::Unknown;
        }
        if self.picks.len() >= RANKING_SIZE {
            return ToggleOutcome::AtCapacity;
        }
        self.picks.push(id.clone());
        ToggleOutcome::Added
    }

    /// Zero-based rank of a picked item.
    pub fn rank_of(&self, id: &CandidateId) -> Option<usize> {
        self.picks.iter().position(|p| p == id)
    }

    pub fn medal_of(&self, id: &CandidateId) -> Option<Medal> {
        self.rank_of(id).and_then(Medal::for_rank)
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn candidates(&self) -> &[CandidateItem] {
        &self.candidates
    }

    /// Validates the pick count. Never mutates the ranking.
    pub fn submit(&self) -> Result<RankedSelection, SubmissionRejected> {
        let items: Vec<CandidateItem> = self
            .picks
            .iter()
            .filter_map(|id| self.candidates.iter().find(|c| &c.id == id).cloned())
            .collect();
        RankedSelection::try_from(items)
    }

    fn is_candidate(&self, id: &CandidateId) -> bool {
        self.candidates.iter().any(|c| &c.id == id)
    }
}
