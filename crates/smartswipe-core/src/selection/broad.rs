use crate::candidate::{CandidateId, CandidateItem};

/// Result of toggling an item in a bounded selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The selection is full; nothing changed.
    AtCapacity,
    /// The id is not one of the candidates; nothing changed.
    Unknown,
}

impl ToggleOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// Bounded, order-preserving shortlist over a fixed set of candidates.
#[derive(Debug, Clone)]
pub struct BroadSelection {
    candidates: Vec<CandidateItem>,
    selected: Vec<CandidateId>,
    capacity: usize,
}

impl BroadSelection {
    pub fn new(candidates: Vec<CandidateItem>, capacity: usize) -> Self {
        Self {
            candidates,
            selected: Vec::new(),
            capacity,
        }
    }

    /// Adds the item if absent and below capacity, removes it if present.
    pub fn toggle(&mut self, id: &CandidateId) -> ToggleOutcome {
        if let Some(position) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(position);
            return ToggleOutcome::Removed;
        }
        if !self.candidates.iter().any(|c| &c.id == id) {
            return ToggleOutcome::Unknown;
        }
        if self.selected.len() >= self.capacity {
            return ToggleOutcome::AtCapacity;
        }
        self.selected.push(id.clone());
        ToggleOutcome::Added
    }

    pub fn is_selected(&self, id: &CandidateId) -> bool {
        self.selected.contains(id)
    }

    /// Whether `id` can currently be added. Selected items and unknown ids
    /// report `false`.
    pub fn can_add(&self, id: &CandidateId) -> bool {
        !self.is_selected(id)
            && self.selected.len() < self.capacity
            && self.candidates.iter().any(|c| &c.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn candidates(&self) -> &[CandidateItem] {
        &self.candidates
    }

    /// Selected items in selection order.
    pub fn selected_items(&self) -> Vec<CandidateItem> {
        self.selected
            .iter()
            .filter_map(|id| self.candidates.iter().find(|c| &c.id == id).cloned())
            .collect()
    }
}
