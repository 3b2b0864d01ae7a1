//! Progression engine
//!
//! `SurveyEngine` owns the session: the active view, the shared progression
//! snapshot, the current field visit and any pending celebration. Each call
//! runs one transition to completion, carries out its effects against the
//! storage and export collaborators, and leaves a settled state behind for
//! the renderer to read through `frame()`.
//!
//! Persistence faults never reach the caller. They are logged and the
//! session continues from memory.

pub mod celebration;
pub mod machine;
pub mod visit;

pub use celebration::{CelebrationToken, CompletionTrigger};
pub use machine::{Effect, MachineState, Notice, NoticeKind, Step};
pub use visit::{FieldVisit, VisitPhase};

use crate::command::{interpret, InputError, Intent, NavTarget};
use crate::content::{Content, ContentHandle};
use crate::core::types::ViewState;
use crate::state::{ExportSink, KeyValueStore, ProgressionState, Storage};
use chrono::Utc;
use std::sync::Arc;

/// What the caller should present after a call
#[derive(Debug, Default)]
pub struct Outcome {
    pub notices: Vec<Notice>,
    /// Set when the completion celebration should start playing
    pub celebration: Option<CelebrationToken>,
}

impl Outcome {
    fn rejected(err: InputError) -> Self {
        Self {
            notices: vec![Notice::error(&err)],
            celebration: None,
        }
    }
}

/// Read-only view of the settled session, handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub view: ViewState,
    pub content: &'a Content,
    pub progression: &'a ProgressionState,
    pub visit: Option<&'a FieldVisit>,
}

pub struct SurveyEngine<K: KeyValueStore, E: ExportSink> {
    content: ContentHandle,
    storage: Storage<K>,
    sink: E,
    export_filename: String,
    state: MachineState,
    visit: Option<FieldVisit>,
    pending_celebration: Option<u64>,
    next_celebration_id: u64,
}

impl<K: KeyValueStore, E: ExportSink> SurveyEngine<K, E> {
    /// Build an engine, restoring whatever the storage holds
    pub fn new(
        content: ContentHandle,
        storage: Storage<K>,
        sink: E,
        export_filename: impl Into<String>,
    ) -> Self {
        let progression = match storage.load_state() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Could not load progression, starting empty: {}", e);
                ProgressionState::default()
            }
        };
        let progression = match progression.retain_fields(|id| content.contains_field(id)) {
            Some(pruned) => {
                tracing::warn!(
                    "Dropped {} stale answers and {} stale pledge entries not in the current survey",
                    pruned.answers_dropped,
                    pruned.pledges_dropped
                );
                pruned.state
            }
            None => progression,
        };
        let celebration_shown = storage.celebration_shown().unwrap_or_else(|e| {
            tracing::warn!("Could not read celebration marker: {}", e);
            false
        });

        tracing::debug!(
            "Restored {}/{} answered fields",
            progression.completed_count(),
            content.field_count()
        );

        Self {
            content,
            storage,
            sink,
            export_filename: export_filename.into(),
            state: MachineState::new(progression, celebration_shown),
            visit: None,
            pending_celebration: None,
            next_celebration_id: 0,
        }
    }

    pub fn view(&self) -> ViewState {
        self.state.view
    }

    /// Current progression snapshot; stays valid after later merges
    pub fn progression(&self) -> Arc<ProgressionState> {
        Arc::clone(&self.state.progression)
    }

    pub fn visit(&self) -> Option<&FieldVisit> {
        self.visit.as_ref()
    }

    pub fn celebration_shown(&self) -> bool {
        self.state.celebration_shown
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn storage(&self) -> &Storage<K> {
        &self.storage
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            view: self.state.view,
            content: &self.content,
            progression: &self.state.progression,
            visit: self.visit.as_ref(),
        }
    }

    /// Interpret and apply one raw input line
    pub fn handle_line(&mut self, raw: &str) -> Outcome {
        let intent = interpret(raw, self.state.view.mode(), self.content.field_count());
        tracing::debug!("{:?} -> {:?}", raw, intent);
        self.apply(intent)
    }

    /// Apply an intent
    pub fn apply(&mut self, intent: Intent) -> Outcome {
        let step = machine::step(&self.state, &self.content, intent, Utc::now());
        self.commit(step)
    }

    /// Explicit navigation from the renderer
    pub fn navigate(&mut self, target: NavTarget) -> Outcome {
        self.apply(Intent::Navigate(target))
    }

    /// Observation has been shown; reveal the pledge step
    pub fn reveal_pledge_step(&mut self) {
        if let Some(visit) = self.visit.as_mut() {
            visit.reveal_pledges();
        }
    }

    /// Tick or untick pledge choice `number` (one-based) in the draft
    pub fn toggle_pledge(&mut self, number: usize) -> Outcome {
        let Some(visit) = self.visit.as_mut() else {
            return Outcome::rejected(InputError::NotInField);
        };
        let Some(field) = self.content.field(visit.field_index) else {
            return Outcome::rejected(InputError::NotInField);
        };
        match visit.toggle_pledge(field, number) {
            Ok(()) => Outcome::default(),
            Err(err) => Outcome::rejected(err),
        }
    }

    /// Save the ticked draft pledges
    pub fn save_pledge_draft(&mut self) -> Outcome {
        let Some(visit) = self.visit.as_ref() else {
            return Outcome::rejected(InputError::NotInField);
        };
        let draft = visit.draft.clone();
        self.save_pledges(draft)
    }

    /// Save a pledge list for the active field
    pub fn save_pledges(&mut self, pledges: Vec<String>) -> Outcome {
        if pledges.is_empty() {
            return Outcome::rejected(InputError::EmptyPledgeSelection);
        }
        self.record_pledges(pledges)
    }

    /// Skip the pledge step for the active field
    pub fn skip_pledge(&mut self) -> Outcome {
        self.record_pledges(Vec::new())
    }

    /// End the celebration, played out or dismissed
    ///
    /// Moves to the summary the first time a live token comes back; returns
    /// whether it did.
    pub fn finish_celebration(&mut self, token: CelebrationToken) -> bool {
        if self.pending_celebration != Some(token.id) {
            tracing::debug!("Ignoring stale celebration token {}", token.id);
            return false;
        }
        self.pending_celebration = None;
        let step = machine::finish_celebration(&self.state);
        self.commit(step);
        true
    }

    fn record_pledges(&mut self, pledges: Vec<String>) -> Outcome {
        let Some(visit) = self.visit.as_ref() else {
            return Outcome::rejected(InputError::NotInField);
        };
        if let Err(err) = visit.check_can_record() {
            return Outcome::rejected(err);
        }
        let saved = pledges.clone();
        let step = machine::record_pledges(&self.state, &self.content, pledges, Utc::now());
        let recorded = step.has_effect(&Effect::Persist);
        let outcome = self.commit(step);
        if recorded {
            if let Some(visit) = self.visit.as_mut() {
                visit.complete(saved);
            }
        }
        outcome
    }

    /// Adopt the step's state and carry out its effects
    fn commit(&mut self, step: Step) -> Outcome {
        let previous_view = self.state.view;
        self.state = step.state;
        self.sync_visit(previous_view);

        let mut outcome = Outcome::default();
        for effect in step.effects {
            match effect {
                Effect::Persist => {
                    if let Err(e) = self.storage.save_state(&self.state.progression) {
                        tracing::warn!("Progress not saved, continuing in memory: {}", e);
                    }
                }
                Effect::ClearProgress => {
                    if let Err(e) = self.storage.clear_state() {
                        tracing::warn!("Could not clear saved progress: {}", e);
                    }
                    if let Err(e) = self.storage.clear_celebration_flag() {
                        tracing::warn!("Could not clear celebration marker: {}", e);
                    }
                    self.pending_celebration = None;
                    tracing::info!("Progress reset");
                }
                Effect::Export(document) => {
                    match self.sink.deliver(&document, &self.export_filename) {
                        Ok(location) => {
                            tracing::info!("Exported results to {}", location);
                            outcome.notices.push(Notice::success(format!(
                                "Results saved: {}",
                                self.export_filename
                            )));
                        }
                        Err(e) => {
                            tracing::error!("Export failed: {}", e);
                            outcome.notices.push(Notice {
                                kind: NoticeKind::Error,
                                text: e.to_string(),
                            });
                        }
                    }
                }
                Effect::MarkCelebrationShown => {
                    if let Err(e) = self.storage.mark_celebration_shown() {
                        tracing::warn!("Could not persist celebration marker: {}", e);
                    }
                }
                Effect::Celebrate => {
                    let id = self.next_celebration_id;
                    self.next_celebration_id += 1;
                    self.pending_celebration = Some(id);
                    tracing::info!("All {} fields answered", self.content.field_count());
                    outcome.celebration = Some(CelebrationToken { id });
                }
                Effect::Answered(option) => {
                    if let Some(visit) = self.visit.as_mut() {
                        visit.select(option);
                    }
                }
                Effect::Notify(notice) => outcome.notices.push(notice),
            }
        }
        outcome
    }

    /// Start, keep or drop the field visit after a view change
    fn sync_visit(&mut self, previous_view: ViewState) {
        match self.state.view {
            ViewState::Field(index) => {
                let same_field = previous_view == ViewState::Field(index) && self.visit.is_some();
                if !same_field {
                    self.visit = self
                        .content
                        .field(index)
                        .map(|field| FieldVisit::begin(index, field, &self.state.progression));
                }
            }
            _ => self.visit = None,
        }
    }
}
