//! Page-level stage controllers for the SmartSwipe funnel.
//!
//! Each stage reads what it needs from the funnel state on activation,
//! redirects to a recovery stage when that input is missing, and writes its
//! own output key when the user moves on.

pub mod bootstrap;
pub mod context;
pub mod questionnaire_stage;
pub mod ranking_stage;
pub mod selection_stage;
pub mod stage;
pub mod swipe_stage;
pub mod synthesis_stage;
pub mod telemetry;

pub use bootstrap::{BootstrapOptions, bootstrap};
pub use context::FunnelContext;
pub use questionnaire_stage::QuestionnaireStage;
pub use ranking_stage::RankingStage;
pub use selection_stage::SelectionStage;
pub use stage::{Advance, StageActivation};
pub use swipe_stage::SwipeStage;
pub use synthesis_stage::SynthesisStage;
