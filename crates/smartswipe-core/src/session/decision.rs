//! Decision log and derived session statistics.

use crate::candidate::CandidateId;
use serde::{Deserialize, Serialize};

/// One recorded accept/reject outcome.
///
/// Created exactly once per item per session and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub item_id: CandidateId,
    pub accepted: bool,
    /// Position in the session log. Authoritative for ordering.
    pub sequence: usize,
}

/// Append-only, session-scoped ordered log of decisions.
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    entries: Vec<Decision>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decision and returns it. The sequence position is the log
    /// length before the append.
    pub fn append(&mut self, item_id: CandidateId, accepted: bool) -> Decision {
        let decision = Decision {
            item_id,
            accepted,
            sequence: self.entries.len(),
        };
        self.entries.push(decision.clone());
        decision
    }

    pub fn contains(&self, item_id: &CandidateId) -> bool {
        self.entries.iter().any(|d| &d.item_id == item_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decision> {
        self.entries.iter()
    }

    /// Ids of accepted items in decision order.
    pub fn accepted_ids(&self) -> impl Iterator<Item = &CandidateId> {
        self.entries.iter().filter(|d| d.accepted).map(|d| &d.item_id)
    }

    /// Recomputes the aggregate from the log.
    pub fn stats(&self) -> SessionStats {
        let accepted = self.entries.iter().filter(|d| d.accepted).count();
        SessionStats {
            total: self.entries.len(),
            accepted,
            rejected: self.entries.len() - accepted,
        }
    }
}

/// Derived aggregate over the decision log. Never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl SessionStats {
    /// Decisions left before the next checkpoint fires.
    pub fn until_next_checkpoint(&self, interval: usize) -> usize {
        if interval == 0 {
            return 0;
        }
        interval - self.total % interval
    }
}
