//! Funnel state shared across stages.
//!
//! Each stage hands its output to the next through a small key-value store.
//! Every key has exactly one writer stage per cycle, and a stage that finds a
//! required key missing or malformed is routed to the key's recovery stage.

mod key;
mod state;
mod store;

pub use key::{FunnelKey, FunnelStage};
pub use state::{FunnelState, SAVED_ARTIFACTS_KEY, StageWriter};
pub use store::FunnelStore;
