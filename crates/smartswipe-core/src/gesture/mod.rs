//! Gesture interpretation.
//!
//! Turns a stream of drag samples into a discrete accept / reject / cancel
//! signal plus live card pose parameters.

mod animation;
mod interpreter;

pub use animation::{CardPose, DRAG_SCALE, EXIT_DISTANCE, EXIT_SCALE, ExitHint};
pub use interpreter::{GestureInterpreter, GestureSample, GestureSignal, GestureUpdate};
