use super::animation::{CardPose, ExitHint};
use crate::config::GestureSettings;

/// One pointer motion sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Horizontal displacement since the interaction started.
    pub displacement: f64,
    /// Horizontal velocity at the time of the sample.
    pub velocity: f64,
    /// `false` on the sample that ends the interaction (pointer release).
    pub in_progress: bool,
}

impl GestureSample {
    pub fn dragging(displacement: f64, velocity: f64) -> Self {
        Self {
            displacement,
            velocity,
            in_progress: true,
        }
    }

    pub fn released(displacement: f64, velocity: f64) -> Self {
        Self {
            displacement,
            velocity,
            in_progress: false,
        }
    }
}

/// Terminal outcome of one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSignal {
    Accept,
    Reject,
    /// The interaction ended below both thresholds.
    Cancel,
}

impl GestureSignal {
    /// `Some(accepted)` for a decision, `None` for `Cancel`.
    pub fn decision(self) -> Option<bool> {
        match self {
            Self::Accept => Some(true),
            Self::Reject => Some(false),
            Self::Cancel => None,
        }
    }
}

/// What the interpreter reports for a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    /// Drag in progress, below threshold. No decision.
    Tracking(CardPose),
    /// The interaction ended.
    Resolved {
        signal: GestureSignal,
        /// Pose after resolution (neutral for every signal).
        pose: CardPose,
        /// Fly-out hint, present for accept and reject.
        exit: Option<ExitHint>,
    },
    /// A release arrived for an interaction that already resolved.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Tracking,
    Resolved,
}

/// Converts raw pointer motion into at most one decision per interaction.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    settings: GestureSettings,
    phase: Phase,
    pose: CardPose,
}

impl GestureInterpreter {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            phase: Phase::Idle,
            pose: CardPose::NEUTRAL,
        }
    }

    /// Current live pose.
    pub fn pose(&self) -> CardPose {
        self.pose
    }

    pub fn is_tracking(&self) -> bool {
        self.phase == Phase::Tracking
    }

    /// Classifies a release. Pure: identical inputs always give the same signal.
    ///
    /// A decision fires when either magnitude exceeds its threshold. The sign of
    /// the displacement picks the direction; a zero displacement defers to the
    /// sign of the velocity.
    pub fn classify(&self, displacement: f64, velocity: f64) -> GestureSignal {
        let triggered = displacement.abs() > self.settings.distance_threshold
            || velocity.abs() > self.settings.velocity_threshold;
        if !triggered {
            return GestureSignal::Cancel;
        }

        let direction = if displacement != 0.0 {
            displacement
        } else {
            velocity
        };
        if direction > 0.0 {
            GestureSignal::Accept
        } else {
            GestureSignal::Reject
        }
    }

    /// Feeds one sample of the active interaction.
    pub fn feed(&mut self, sample: GestureSample) -> GestureUpdate {
        if sample.in_progress {
            self.phase = Phase::Tracking;
            self.pose = CardPose::from_displacement(sample.displacement, true, &self.settings);
            return GestureUpdate::Tracking(self.pose);
        }

        if self.phase == Phase::Resolved {
            return GestureUpdate::Ignored;
        }

        let signal = self.classify(sample.displacement, sample.velocity);
        self.resolve(signal)
    }

    /// Button equivalent of a swipe. Bypasses sampling entirely.
    pub fn decide(&mut self, accepted: bool) -> GestureUpdate {
        let signal = if accepted {
            GestureSignal::Accept
        } else {
            GestureSignal::Reject
        };
        self.resolve(signal)
    }

    fn resolve(&mut self, signal: GestureSignal) -> GestureUpdate {
        self.phase = Phase::Resolved;
        self.pose = CardPose::NEUTRAL;
        let exit = signal
            .decision()
            .map(|accepted| ExitHint::towards(accepted, &self.settings));
        GestureUpdate::Resolved {
            signal,
            pose: self.pose,
            exit,
        }
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(interpreter: &mut GestureInterpreter, displacement: f64, velocity: f64) -> GestureSignal {
        match interpreter.feed(GestureSample::released(displacement, velocity)) {
            GestureUpdate::Resolved { signal, .. } => signal,
            other => panic!("expected resolution, got {other:?}"),
        }
    }

    #[test]
    fn test_displacement_beyond_threshold_decides_by_sign() {
        let mut interpreter = GestureInterpreter::default();
        assert_eq!(release(&mut interpreter, 150.0, 0.0), GestureSignal::Accept);

        let mut interpreter = GestureInterpreter::default();
        assert_eq!(release(&mut interpreter, -150.0, 0.0), GestureSignal::Reject);
    }

    #[test]
    fn test_below_both_thresholds_cancels() {
        let mut interpreter = GestureInterpreter::default();
        assert_eq!(release(&mut interpreter, 50.0, 0.2), GestureSignal::Cancel);
        assert_eq!(interpreter.pose(), CardPose::NEUTRAL);
    }

    #[test]
    fn test_zero_displacement_uses_velocity_sign() {
        let mut interpreter = GestureInterpreter::default();
        assert_eq!(release(&mut interpreter, 0.0, 0.8), GestureSignal::Accept);

        let mut interpreter = GestureInterpreter::default();
        assert_eq!(release(&mut interpreter, 0.0, -0.8), GestureSignal::Reject);
    }

    #[test]
    fn test_threshold_is_strict() {
        let interpreter = GestureInterpreter::default();
        assert_eq!(interpreter.classify(100.0, 0.5), GestureSignal::Cancel);
        assert_eq!(interpreter.classify(100.1, 0.0), GestureSignal::Accept);
    }

    #[test]
    fn test_tracking_reports_pose_without_decision() {
        let mut interpreter = GestureInterpreter::default();
        let update = interpreter.feed(GestureSample::dragging(150.0, 0.1));

        let GestureUpdate::Tracking(pose) = update else {
            panic!("expected tracking update");
        };
        assert_eq!(pose.x, 150.0);
        assert_eq!(pose.rotation_deg, 15.0);
        assert!(interpreter.is_tracking());
    }

    #[test]
    fn test_at_most_one_terminal_signal_per_interaction() {
        let mut interpreter = GestureInterpreter::default();
        interpreter.feed(GestureSample::dragging(80.0, 0.3));
        assert_eq!(release(&mut interpreter, 180.0, 0.0), GestureSignal::Accept);
        assert_eq!(
            interpreter.feed(GestureSample::released(180.0, 0.0)),
            GestureUpdate::Ignored
        );

        // A new drag starts a new interaction.
        interpreter.feed(GestureSample::dragging(-40.0, -0.1));
        assert_eq!(release(&mut interpreter, -140.0, 0.0), GestureSignal::Reject);
    }

    #[test]
    fn test_programmatic_decision_carries_exit_hint() {
        let mut interpreter = GestureInterpreter::default();
        let GestureUpdate::Resolved { signal, exit, pose } = interpreter.decide(false) else {
            panic!("expected resolution");
        };
        assert_eq!(signal, GestureSignal::Reject);
        assert_eq!(pose, CardPose::NEUTRAL);
        assert_eq!(exit.map(|e| e.x), Some(-1000.0));
    }
}
