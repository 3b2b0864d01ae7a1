//! One-shot completion detection
//!
//! The celebration fires on the merge that brings the answered count to the
//! field count, and only while the persisted "shown" marker is false.

/// Decides whether a completion should be celebrated
#[derive(Debug, Clone, Copy)]
pub struct CompletionTrigger {
    total_fields: usize,
}

impl CompletionTrigger {
    pub fn new(total_fields: usize) -> Self {
        Self { total_fields }
    }

    /// Whether a Select-driven merge that left `answered` fields answered fires
    pub fn should_fire(&self, answered: usize, already_shown: bool) -> bool {
        self.total_fields > 0 && answered == self.total_fields && !already_shown
    }
}

/// Handed to the renderer when a celebration should play
///
/// Not `Clone`: giving it back through `SurveyEngine::finish_celebration`
/// consumes it, whether the sequence played out or was dismissed.
#[derive(Debug, PartialEq, Eq)]
pub struct CelebrationToken {
    pub(crate) id: u64,
}
