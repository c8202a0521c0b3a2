//! Questionnaire stage.

use crate::context::FunnelContext;
use crate::stage::{Advance, StageActivation, route};
use smartswipe_core::error::Result;
use smartswipe_core::funnel::{FunnelStage, StageWriter};
use smartswipe_core::questionnaire::{AnswerError, Questionnaire, QuestionnaireStep};
use smartswipe_core::selection::RankedSelection;

pub struct QuestionnaireStage {
    ranked: RankedSelection,
    questionnaire: Questionnaire,
    writer: StageWriter,
}

impl QuestionnaireStage {
    pub async fn activate(ctx: &FunnelContext) -> Result<StageActivation<Self>> {
        let ranked = match route(FunnelStage::Questionnaire, ctx.state.read_selected().await)? {
            StageActivation::Ready(ranked) => ranked,
            StageActivation::Redirect(stage) => return Ok(StageActivation::Redirect(stage)),
        };

        Ok(StageActivation::Ready(Self {
            ranked,
            questionnaire: Questionnaire::new(),
            writer: ctx.state.writer(FunnelStage::Questionnaire),
        }))
    }

    /// The ranked three shown alongside the questions.
    pub fn ranked(&self) -> &RankedSelection {
        &self.ranked
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn answer(&mut self, question_id: &str, option: &str) -> std::result::Result<(), AnswerError> {
        self.questionnaire.answer(question_id, option)
    }

    pub fn back(&mut self) -> bool {
        self.questionnaire.back()
    }

    /// Moves to the next question. After the last one the answers are written.
    pub async fn next(&mut self) -> Result<Advance> {
        match self.questionnaire.next() {
            Ok(QuestionnaireStep::Question(_)) => Ok(Advance::Stay),
            Ok(QuestionnaireStep::Complete(answers)) => {
                self.writer.write_answers(&answers).await?;
                Ok(Advance::To(FunnelStage::Synthesis))
            }
            Err(e) => Ok(Advance::Blocked(e.to_string())),
        }
    }
}
