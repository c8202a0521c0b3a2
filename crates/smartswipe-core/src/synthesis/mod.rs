//! Final artifact synthesis.

mod fallback;
mod model;
mod service;

pub use fallback::{FALLBACK_ARTIFACT_ID, FALLBACK_CONFIDENCE, compose_fallback};
pub use model::{Artifact, LOCAL_REASONING_MARKER};
pub use service::{IdeaSynthesizer, SynthesisService};
