//! Candidate pool management.
//!
//! The pool holds the ordered queue of received items and the cursor of the
//! item currently on screen. It is owned by the swipe session, which is its
//! only writer.

use crate::candidate::{CandidateId, CandidateItem, ItemSource, SourceError};
use crate::error::{FunnelError, Result};
use std::collections::HashSet;

/// Signal returned by [`CandidatePool::advance`] when the queue is running low.
///
/// The pool does not fetch anything itself. The session turns this into a
/// background replenishment and reports back through
/// [`CandidatePool::finish_replenishment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplenishRequest {
    /// Number of items still ahead of the cursor.
    pub remaining: usize,
}

/// Ordered working set of undecided items.
#[derive(Debug, Default)]
pub struct CandidatePool {
    queue: Vec<CandidateItem>,
    cursor: usize,
    seen: HashSet<CandidateId>,
    replenish_threshold: usize,
    replenishing: bool,
}

impl CandidatePool {
    pub fn new(replenish_threshold: usize) -> Self {
        Self {
            replenish_threshold,
            ..Self::default()
        }
    }

    /// Requests up to `size` items from the source.
    ///
    /// If the first query fails or comes back empty, a single generation
    /// request is issued before querying again. Returns the number of new
    /// items appended.
    ///
    /// # Errors
    ///
    /// `FunnelError::PoolUnavailable` when the second query also yields nothing.
    pub async fn load_initial_pool(&mut self, source: &dyn ItemSource, size: usize) -> Result<usize> {
        match source.fetch_pool(size).await {
            Ok(items) => {
                let added = self.append(items);
                if added > 0 {
                    return Ok(added);
                }
                tracing::debug!("[CandidatePool] Source returned no new items, requesting generation");
            }
            Err(SourceError::Empty) => {
                tracing::debug!("[CandidatePool] Source returned no items, requesting generation");
            }
            Err(e) => {
                tracing::warn!("[CandidatePool] Initial fetch failed, requesting generation: {}", e);
            }
        }

        if let Err(e) = source.request_generation().await {
            tracing::warn!("[CandidatePool] Generation request failed: {}", e);
        }

        match source.fetch_pool(size).await {
            Ok(items) => match self.append(items) {
                0 => Err(FunnelError::pool_unavailable(
                    "no new items available after generation",
                )),
                added => Ok(added),
            },
            Err(SourceError::Empty) => Err(FunnelError::pool_unavailable(
                "no items available after generation",
            )),
            Err(e) => Err(FunnelError::pool_unavailable(e.to_string())),
        }
    }

    /// Appends items to the end of the queue, skipping ids already received.
    ///
    /// Returns the number of items actually added.
    pub fn append(&mut self, items: Vec<CandidateItem>) -> usize {
        let before = self.queue.len();
        for item in items {
            if self.seen.insert(item.id.clone()) {
                self.queue.push(item);
            }
        }
        self.queue.len() - before
    }

    /// The item at the cursor, or `None` once the cursor passed the end.
    pub fn current_item(&self) -> Option<&CandidateItem> {
        self.queue.get(self.cursor)
    }

    /// The item after the current one, for a preview card.
    pub fn peek_next(&self) -> Option<&CandidateItem> {
        self.queue.get(self.cursor + 1)
    }

    /// Moves the cursor forward by one.
    ///
    /// Returns a replenishment request when fewer than the configured number
    /// of items remain ahead and no replenishment is already outstanding.
    pub fn advance(&mut self) -> Option<ReplenishRequest> {
        if self.cursor < self.queue.len() {
            self.cursor += 1;
        }

        let remaining = self.remaining();
        if remaining < self.replenish_threshold && !self.replenishing {
            self.replenishing = true;
            tracing::debug!(
                "[CandidatePool] {} item(s) left ahead of cursor, replenishment requested",
                remaining
            );
            return Some(ReplenishRequest { remaining });
        }
        None
    }

    /// Completes an outstanding replenishment.
    ///
    /// Failures are swallowed: the session keeps going and simply runs out of
    /// items sooner.
    pub fn finish_replenishment(&mut self, outcome: std::result::Result<Vec<CandidateItem>, SourceError>) -> usize {
        self.replenishing = false;
        match outcome {
            Ok(items) => {
                let added = self.append(items);
                tracing::debug!("[CandidatePool] Replenished with {} new item(s)", added);
                added
            }
            Err(e) => {
                tracing::warn!("[CandidatePool] Replenishment failed: {}", e);
                0
            }
        }
    }

    pub fn is_replenishing(&self) -> bool {
        self.replenishing
    }

    /// Items ahead of the cursor, including the current one.
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.cursor)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Looks up any item received during this session.
    pub fn get(&self, id: &CandidateId) -> Option<&CandidateItem> {
        self.queue.iter().find(|item| &item.id == id)
    }
}
