//! Broad selection stage.

use crate::context::FunnelContext;
use crate::stage::{Advance, StageActivation, route};
use smartswipe_core::candidate::CandidateId;
use smartswipe_core::error::Result;
use smartswipe_core::funnel::{FunnelStage, StageWriter};
use smartswipe_core::selection::{BroadSelection, RANKING_SIZE, ToggleOutcome};

/// Narrows the accepted set to a bounded shortlist.
pub struct SelectionStage {
    selection: BroadSelection,
    writer: StageWriter,
}

impl SelectionStage {
    pub async fn activate(ctx: &FunnelContext) -> Result<StageActivation<Self>> {
        let accepted = match route(FunnelStage::Selection, ctx.state.read_accepted().await)? {
            StageActivation::Ready(accepted) => accepted,
            StageActivation::Redirect(stage) => return Ok(StageActivation::Redirect(stage)),
        };

        Ok(StageActivation::Ready(Self {
            selection: BroadSelection::new(accepted, ctx.config.selection.broad_capacity),
            writer: ctx.state.writer(FunnelStage::Selection),
        }))
    }

    pub fn selection(&self) -> &BroadSelection {
        &self.selection
    }

    pub fn toggle(&mut self, id: &CandidateId) -> ToggleOutcome {
        self.selection.toggle(id)
    }

    /// Writes the shortlist once it holds enough items to fill a ranking.
    pub async fn proceed(&self) -> Result<Advance> {
        if self.selection.len() < RANKING_SIZE {
            let missing = RANKING_SIZE - self.selection.len();
            return Ok(Advance::Blocked(format!("need {missing} more")));
        }
        self.writer.write_shortlist(&self.selection.selected_items()).await?;
        Ok(Advance::To(FunnelStage::Ranking))
    }
}
