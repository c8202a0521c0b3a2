//! Shared dependencies handed to every stage.

use smartswipe_core::candidate::ItemSource;
use smartswipe_core::config::EngineConfig;
use smartswipe_core::funnel::{FunnelState, FunnelStore};
use smartswipe_core::session::DecisionRecorder;
use smartswipe_core::synthesis::{IdeaSynthesizer, SynthesisService};
use std::sync::Arc;

/// Engine configuration plus the collaborators the stages talk to.
#[derive(Clone)]
pub struct FunnelContext {
    pub config: EngineConfig,
    pub state: FunnelState,
    pub item_source: Arc<dyn ItemSource>,
    pub recorder: Arc<dyn DecisionRecorder>,
    pub synthesizer: IdeaSynthesizer,
}

impl FunnelContext {
    pub fn new(
        config: EngineConfig,
        store: Arc<dyn FunnelStore>,
        item_source: Arc<dyn ItemSource>,
        recorder: Arc<dyn DecisionRecorder>,
        synthesis: Arc<dyn SynthesisService>,
    ) -> Self {
        let state = FunnelState::new(store, config.session.stage_exit_minimum);
        let synthesizer = IdeaSynthesizer::new(synthesis, config.synthesis.timeout());
        Self {
            config,
            state,
            item_source,
            recorder,
            synthesizer,
        }
    }
}
