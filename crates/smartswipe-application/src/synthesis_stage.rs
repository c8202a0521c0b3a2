//! Synthesis stage. Terminal stage of a cycle.

use crate::context::FunnelContext;
use crate::stage::{StageActivation, route};
use smartswipe_core::error::Result;
use smartswipe_core::funnel::{FunnelStage, StageWriter};
use smartswipe_core::questionnaire::QuestionnaireAnswers;
use smartswipe_core::selection::RankedSelection;
use smartswipe_core::synthesis::{Artifact, IdeaSynthesizer};

pub struct SynthesisStage {
    ranked: RankedSelection,
    answers: QuestionnaireAnswers,
    synthesizer: IdeaSynthesizer,
    writer: StageWriter,
}

impl SynthesisStage {
    pub async fn activate(ctx: &FunnelContext) -> Result<StageActivation<Self>> {
        let ranked = match route(FunnelStage::Synthesis, ctx.state.read_selected().await)? {
            StageActivation::Ready(ranked) => ranked,
            StageActivation::Redirect(stage) => return Ok(StageActivation::Redirect(stage)),
        };
        let answers = match route(FunnelStage::Synthesis, ctx.state.read_answers().await)? {
            StageActivation::Ready(answers) => answers,
            StageActivation::Redirect(stage) => return Ok(StageActivation::Redirect(stage)),
        };

        Ok(StageActivation::Ready(Self {
            ranked,
            answers,
            synthesizer: ctx.synthesizer.clone(),
            writer: ctx.state.writer(FunnelStage::Synthesis),
        }))
    }

    /// Always produces an artifact; service failures fall back locally.
    pub async fn synthesize(&self) -> Artifact {
        self.synthesizer.synthesize(&self.ranked, &self.answers).await
    }

    /// Saves `artifact` to the saved-ideas list, stamped with the save time.
    /// The list is kept across cycles.
    pub async fn save(&self, artifact: &Artifact) -> Result<Artifact> {
        let mut saved = artifact.clone();
        saved.saved_at = Some(chrono::Utc::now().to_rfc3339());
        self.writer.save_artifact(&saved).await?;
        Ok(saved)
    }

    /// Ends the cycle. Clears every funnel key and returns the swipe stage.
    pub async fn start_new_cycle(&self) -> Result<FunnelStage> {
        self.writer.clear_cycle().await?;
        Ok(FunnelStage::Swipe)
    }
}
