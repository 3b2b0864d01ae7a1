//! View state machine
//!
//! `step` applies one intent to the current session state and returns the
//! next state plus the side effects the engine must carry out. It performs
//! no I/O; the progression record is replaced, never edited in place.

use crate::command::{FieldResolver, InputError, Intent, NavTarget};
use crate::content::Content;
use crate::core::types::{OptionKey, ViewState};
use crate::engine::celebration::CompletionTrigger;
use crate::state::{export_document, ExportDocument, ProgressionState};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Everything a transition reads and may replace
#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    pub view: ViewState,
    pub progression: Arc<ProgressionState>,
    pub celebration_shown: bool,
}

impl MachineState {
    pub fn new(progression: ProgressionState, celebration_shown: bool) -> Self {
        Self {
            view: ViewState::Boot,
            progression: Arc::new(progression),
            celebration_shown,
        }
    }
}

/// Kind of a user-visible line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    System,
    Success,
    Error,
}

/// A line the renderer should add to the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::System,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(err: &InputError) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: err.to_string(),
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the new progression record
    Persist,
    /// Erase the progression record and the celebration marker
    ClearProgress,
    /// Deliver this document to the export sink
    Export(ExportDocument),
    /// Persist the celebration marker before anything is presented
    MarkCelebrationShown,
    /// Ask the renderer to play the one-shot celebration
    Celebrate,
    /// An answer was recorded for the active field
    Answered(OptionKey),
    Notify(Notice),
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: MachineState,
    pub effects: Vec<Effect>,
}

impl Step {
    fn unchanged(state: &MachineState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }

    fn to_view(state: &MachineState, view: ViewState) -> Self {
        Self {
            state: MachineState {
                view,
                ..state.clone()
            },
            effects: Vec::new(),
        }
    }

    fn rejected(state: &MachineState, err: &InputError) -> Self {
        Self {
            state: state.clone(),
            effects: vec![Effect::Notify(Notice::error(err))],
        }
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Notify(n) => Some(n),
            _ => None,
        })
    }

    pub fn has_effect(&self, wanted: &Effect) -> bool {
        self.effects.iter().any(|e| e == wanted)
    }
}

/// Apply one intent
pub fn step(state: &MachineState, content: &Content, intent: Intent, now: DateTime<Utc>) -> Step {
    match intent {
        Intent::Navigate(target) => navigate(state, content, target),
        Intent::AdvanceCurrentField => advance(state, content),
        Intent::Select(option) => select(state, content, option, now),
        Intent::Export => Step {
            state: state.clone(),
            effects: vec![Effect::Export(export_document(&state.progression, now))],
        },
        Intent::RequestReset => Step::to_view(state, ViewState::Reset),
        Intent::ConfirmReset => {
            if state.view != ViewState::Reset {
                return Step::rejected(state, &InputError::NoPendingReset);
            }
            Step {
                state: MachineState {
                    view: ViewState::Boot,
                    progression: Arc::new(ProgressionState::empty(now)),
                    celebration_shown: false,
                },
                effects: vec![
                    Effect::ClearProgress,
                    Effect::Notify(Notice::success("Progress reset")),
                ],
            }
        }
        Intent::CancelReset => {
            if state.view != ViewState::Reset {
                return Step::rejected(state, &InputError::NoPendingReset);
            }
            let mut next = Step::to_view(state, ViewState::Hub);
            next.effects
                .push(Effect::Notify(Notice::system("Reset cancelled")));
            next
        }
        Intent::Error(err) => Step::rejected(state, &err),
        Intent::Unknown(Some(err)) => Step::rejected(state, &err),
        Intent::Unknown(None) => Step::unchanged(state),
    }
}

/// Record the pledge list for the active field; an empty list is a skip
pub fn record_pledges(
    state: &MachineState,
    content: &Content,
    pledges: Vec<String>,
    now: DateTime<Utc>,
) -> Step {
    let Some(field) = state.view.field_index().and_then(|i| content.field(i)) else {
        return Step::rejected(state, &InputError::NotInField);
    };
    if !state.progression.is_field_completed(&field.id) {
        return Step::rejected(state, &InputError::NoAnswerYet);
    }

    let notice = if pledges.is_empty() {
        Notice::system("Pledge skipped")
    } else {
        Notice::success(format!("Saved {} pledges", pledges.len()))
    };

    Step {
        state: MachineState {
            progression: Arc::new(state.progression.with_pledges(&field.id, pledges, now)),
            ..state.clone()
        },
        effects: vec![Effect::Persist, Effect::Notify(notice)],
    }
}

/// Move to the celebration's destination
pub fn finish_celebration(state: &MachineState) -> Step {
    Step::to_view(state, ViewState::Summary)
}

fn navigate(state: &MachineState, content: &Content, target: NavTarget) -> Step {
    match target {
        NavTarget::Boot => Step::to_view(state, ViewState::Boot),
        NavTarget::Help => Step::to_view(state, ViewState::Help),
        NavTarget::Hub => Step::to_view(state, ViewState::Hub),
        NavTarget::Summary => Step::to_view(state, ViewState::Summary),
        NavTarget::Field(reference) => match FieldResolver::new(content).resolve(&reference) {
            Ok(found) => Step::to_view(state, ViewState::Field(found.index)),
            Err(err) => Step::rejected(state, &err),
        },
    }
}

fn advance(state: &MachineState, content: &Content) -> Step {
    let Some(current) = state.view.field_index() else {
        return Step::rejected(state, &InputError::NextOutsideField);
    };
    let next = current + 1;
    if next < content.field_count() {
        Step::to_view(state, ViewState::Field(next))
    } else {
        Step::rejected(state, &InputError::AlreadyAtLastField)
    }
}

fn select(state: &MachineState, content: &Content, option: OptionKey, now: DateTime<Utc>) -> Step {
    let Some(field) = state.view.field_index().and_then(|i| content.field(i)) else {
        return Step::rejected(state, &InputError::NotInField);
    };

    let progression = state.progression.with_answer(&field.id, option, now);
    let mut effects = vec![
        Effect::Persist,
        Effect::Answered(option),
        Effect::Notify(Notice::success(format!("You chose option {}", option))),
    ];

    let trigger = CompletionTrigger::new(content.field_count());
    let fire = trigger.should_fire(progression.completed_count(), state.celebration_shown);
    if fire {
        effects.push(Effect::MarkCelebrationShown);
        effects.push(Effect::Celebrate);
    }

    Step {
        state: MachineState {
            view: state.view,
            progression: Arc::new(progression),
            celebration_shown: state.celebration_shown || fire,
        },
        effects,
    }
}
