//! Swipe session.
//!
//! A session walks the candidate pool one item at a time, records every
//! accept/reject decision in order, and pauses at checkpoints so the user can
//! choose between swiping on and moving to selection.

mod decision;
mod machine;
mod recorder;
mod state;

pub use decision::{Decision, DecisionLog, SessionStats};
pub use machine::{DecisionOutcome, ExitDecision, SessionAlert, SwipeSession};
pub use recorder::DecisionRecorder;
pub use state::{ErrorReason, SessionState};
