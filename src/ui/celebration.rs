//! Celebration timeline
//!
//! Phase boundaries are fixed offsets from the start of the sequence. The
//! renderer walks `schedule` in order and may dismiss at any point.

use std::time::Duration;

const INTRO_END: Duration = Duration::from_millis(300);
const OUTRO_START: Duration = Duration::from_millis(2200);
const SEQUENCE_END: Duration = Duration::from_millis(2800);
const REDUCED_MOTION_END: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationPhase {
    Intro,
    Main,
    Outro,
    /// Static card shown instead of the animation
    Still,
}

#[derive(Debug, Clone, Copy)]
pub struct CelebrationSequence {
    reduced_motion: bool,
}

impl CelebrationSequence {
    pub fn new(reduced_motion: bool) -> Self {
        Self { reduced_motion }
    }

    /// Phases in play order with how long each lasts
    pub fn schedule(&self) -> Vec<(CelebrationPhase, Duration)> {
        if self.reduced_motion {
            return vec![(CelebrationPhase::Still, REDUCED_MOTION_END)];
        }
        vec![
            (CelebrationPhase::Intro, INTRO_END),
            (CelebrationPhase::Main, OUTRO_START - INTRO_END),
            (CelebrationPhase::Outro, SEQUENCE_END - OUTRO_START),
        ]
    }
}
