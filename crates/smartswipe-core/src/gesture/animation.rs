//! Card pose derived from drag displacement.
//!
//! Poses are presentation hints. They never influence whether a decision is
//! recorded.

use crate::config::GestureSettings;

/// Horizontal distance a resolved card flies out to.
pub const EXIT_DISTANCE: f64 = 1000.0;
/// Scale of a card while it is being dragged.
pub const DRAG_SCALE: f64 = 1.05;
/// Scale of a card while it flies out.
pub const EXIT_SCALE: f64 = 0.9;

/// Live animation parameters for the current card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub x: f64,
    pub rotation_deg: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl CardPose {
    pub const NEUTRAL: CardPose = CardPose {
        x: 0.0,
        rotation_deg: 0.0,
        opacity: 1.0,
        scale: 1.0,
    };

    /// Computes the pose for a displacement. Pure.
    pub fn from_displacement(displacement: f64, dragging: bool, settings: &GestureSettings) -> Self {
        Self {
            x: displacement,
            rotation_deg: rotation_for(displacement, settings),
            opacity: opacity_for(displacement, settings),
            scale: if dragging { DRAG_SCALE } else { 1.0 },
        }
    }
}

/// Fly-out parameters emitted together with a terminal decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitHint {
    pub x: f64,
    pub rotation_deg: f64,
    pub scale: f64,
}

impl ExitHint {
    pub fn towards(accepted: bool, settings: &GestureSettings) -> Self {
        let sign = if accepted { 1.0 } else { -1.0 };
        Self {
            x: sign * EXIT_DISTANCE,
            rotation_deg: sign * settings.max_rotation_deg,
            scale: EXIT_SCALE,
        }
    }
}

fn rotation_for(displacement: f64, settings: &GestureSettings) -> f64 {
    if settings.rotation_span <= 0.0 {
        return 0.0;
    }
    (displacement / settings.rotation_span).clamp(-1.0, 1.0) * settings.max_rotation_deg
}

fn opacity_for(displacement: f64, settings: &GestureSettings) -> f64 {
    let distance = displacement.abs();
    if distance <= settings.fade_start {
        return 1.0;
    }
    if distance >= settings.fade_end {
        return 0.0;
    }
    1.0 - (distance - settings.fade_start) / (settings.fade_end - settings.fade_start)
}
