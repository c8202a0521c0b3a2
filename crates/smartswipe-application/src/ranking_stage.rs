//! Top-3 ranking stage.

use crate::context::FunnelContext;
use crate::stage::{Advance, StageActivation, route};
use smartswipe_core::candidate::{CandidateId, CandidateItem};
use smartswipe_core::error::Result;
use smartswipe_core::funnel::{FunnelStage, StageWriter};
use smartswipe_core::selection::{ToggleOutcome, TopKRanking};

/// Picks the final three in rank order.
pub struct RankingStage {
    ranking: TopKRanking,
    writer: StageWriter,
}

impl RankingStage {
    /// Ranks over the shortlist when one carried over from broad selection,
    /// seeded with the shortlist order. Otherwise ranks over the full
    /// accepted set with no picks.
    pub async fn activate(ctx: &FunnelContext) -> Result<StageActivation<Self>> {
        let accepted = match route(FunnelStage::Ranking, ctx.state.read_accepted().await)? {
            StageActivation::Ready(accepted) => accepted,
            StageActivation::Redirect(stage) => return Ok(StageActivation::Redirect(stage)),
        };

        let ranking = match ctx.state.read_shortlist(&accepted).await? {
            Some(shortlist) => {
                let picks: Vec<CandidateId> = shortlist.iter().map(|item| item.id.clone()).collect();
                TopKRanking::with_picks(shortlist, &picks)
            }
            None => TopKRanking::new(accepted),
        };

        Ok(StageActivation::Ready(Self {
            ranking,
            writer: ctx.state.writer(FunnelStage::Ranking),
        }))
    }

    pub fn ranking(&self) -> &TopKRanking {
        &self.ranking
    }

    pub fn candidates(&self) -> &[CandidateItem] {
        self.ranking.candidates()
    }

    pub fn toggle(&mut self, id: &CandidateId) -> ToggleOutcome {
        self.ranking.toggle(id)
    }

    /// Writes the ranked three, or explains what is missing.
    pub async fn submit(&self) -> Result<Advance> {
        match self.ranking.submit() {
            Ok(ranked) => {
                self.writer.write_selected(&ranked).await?;
                Ok(Advance::To(FunnelStage::Questionnaire))
            }
            Err(rejected) => Ok(Advance::Blocked(rejected.to_string())),
        }
    }
}
