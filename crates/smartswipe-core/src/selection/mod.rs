//! Selection stages.
//!
//! Broad selection narrows the accepted items to a bounded shortlist. Top-K
//! ranking then picks exactly [`RANKING_SIZE`] items, ordered by pick order.

mod broad;
mod ranking;

pub use broad::{BroadSelection, ToggleOutcome};
pub use ranking::{Medal, RankedSelection, SubmissionRejected, TopKRanking};

/// Upper bound of the broad selection shortlist.
pub const BROAD_SELECTION_CAPACITY: usize = 5;
/// Number of items a ranking submission must contain.
pub const RANKING_SIZE: usize = 3;
