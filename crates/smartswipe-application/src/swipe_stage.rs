//! Swipe stage: the cycle starter.

use crate::context::FunnelContext;
use crate::stage::Advance;
use smartswipe_core::error::Result;
use smartswipe_core::funnel::{FunnelStage, StageWriter};
use smartswipe_core::gesture::{GestureInterpreter, GestureSample, GestureUpdate};
use smartswipe_core::session::{DecisionOutcome, ExitDecision, SwipeSession};

/// Drives one swipe session and hands the accepted set to selection.
pub struct SwipeStage {
    session: SwipeSession,
    gestures: GestureInterpreter,
    writer: StageWriter,
}

impl SwipeStage {
    /// Starts a new cycle: clears all funnel keys, then loads the pool.
    ///
    /// A pool failure does not fail activation; the session is returned in
    /// its `Error` state so the host can offer a retry.
    pub async fn activate(ctx: &FunnelContext) -> Result<Self> {
        let writer = ctx.state.writer(FunnelStage::Swipe);
        writer.clear_cycle().await?;

        let mut session = SwipeSession::new(
            ctx.config.session.clone(),
            ctx.item_source.clone(),
            ctx.recorder.clone(),
        );
        if let Err(e) = session.start().await {
            tracing::warn!("[SwipeStage] Session {} failed to start: {}", session.id(), e);
        }

        Ok(Self {
            session,
            gestures: GestureInterpreter::new(ctx.config.gesture.clone()),
            writer,
        })
    }

    pub fn session(&self) -> &SwipeSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SwipeSession {
        &mut self.session
    }

    pub fn gestures(&self) -> &GestureInterpreter {
        &self.gestures
    }

    /// Feeds one drag sample. Returns the decision when the sample resolved one.
    pub fn drag(&mut self, sample: GestureSample) -> Result<(GestureUpdate, Option<DecisionOutcome>)> {
        let update = self.gestures.feed(sample);
        let outcome = self.session.apply_gesture(&update)?;
        Ok((update, outcome))
    }

    /// Accept/reject button.
    pub fn press(&mut self, accepted: bool) -> Result<(GestureUpdate, Option<DecisionOutcome>)> {
        let update = self.gestures.decide(accepted);
        let outcome = self.session.apply_gesture(&update)?;
        Ok((update, outcome))
    }

    /// Tries to leave the session. On success the accepted items are written
    /// and the host navigates to selection.
    pub async fn leave(&mut self) -> Result<Advance> {
        match self.session.request_exit()? {
            ExitDecision::Leave { accepted } => {
                self.writer.write_accepted(&accepted).await?;
                Ok(Advance::To(FunnelStage::Selection))
            }
            ExitDecision::Denied { deficit, minimum } => Ok(Advance::Blocked(format!(
                "Accept {} more idea(s) to continue (at least {} required)",
                deficit, minimum
            ))),
        }
    }
}
