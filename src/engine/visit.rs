//! Per-visit field sub-phases
//!
//! A `FieldVisit` lives from entering a field until the active field changes
//! or the field view is left. Nothing here is persisted; the initial phase
//! is derived from the progression record each time a field is entered.

use crate::command::InputError;
use crate::content::SurveyField;
use crate::core::types::OptionKey;
use crate::state::ProgressionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitPhase {
    /// Waiting for an option
    Selection,
    /// Answer recorded; observation and recommendation showing
    Observation,
    /// Pledge choices showing
    Pledge,
    /// Pledge step saved or skipped
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldVisit {
    pub field_index: usize,
    pub field_id: String,
    pub phase: VisitPhase,
    pub selected: Option<OptionKey>,
    /// Pledge choices ticked but not yet saved, in the order they were ticked
    pub draft: Vec<String>,
}

impl FieldVisit {
    /// Start a visit, resuming from whatever the record already holds
    pub fn begin(field_index: usize, field: &SurveyField, progression: &ProgressionState) -> Self {
        let selected = progression.answer_for(&field.id);
        let phase = match (selected, progression.is_pledge_resolved(&field.id)) {
            (Some(_), true) => VisitPhase::Complete,
            (Some(_), false) => VisitPhase::Pledge,
            (None, _) => VisitPhase::Selection,
        };
        let draft = progression
            .pledges_for(&field.id)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        Self {
            field_index,
            field_id: field.id.clone(),
            phase,
            selected,
            draft,
        }
    }

    /// An option was chosen; the answer shows before the pledge step
    pub fn select(&mut self, option: OptionKey) {
        self.selected = Some(option);
        self.phase = VisitPhase::Observation;
    }

    /// Observation has been shown long enough; reveal the pledge step
    pub fn reveal_pledges(&mut self) {
        if self.phase == VisitPhase::Observation {
            self.phase = VisitPhase::Pledge;
        }
    }

    /// Whether pledges may be saved or skipped right now
    pub fn check_can_record(&self) -> Result<(), InputError> {
        match self.phase {
            VisitPhase::Selection => Err(InputError::NoAnswerYet),
            VisitPhase::Complete => Err(InputError::PledgesAlreadyRecorded),
            VisitPhase::Observation | VisitPhase::Pledge => Ok(()),
        }
    }

    /// Tick or untick the pledge choice with the given one-based number
    pub fn toggle_pledge(&mut self, field: &SurveyField, number: usize) -> Result<(), InputError> {
        self.check_can_record()?;
        let choice = number
            .checked_sub(1)
            .and_then(|i| field.pledge.choices.get(i))
            .ok_or(InputError::UnknownPledge(number))?;

        if let Some(pos) = self.draft.iter().position(|p| p == choice) {
            self.draft.remove(pos);
        } else {
            self.draft.push(choice.clone());
        }
        Ok(())
    }

    pub fn is_drafted(&self, choice: &str) -> bool {
        self.draft.iter().any(|p| p == choice)
    }

    /// Pledges were saved or skipped
    pub fn complete(&mut self, saved: Vec<String>) {
        self.draft = saved;
        self.phase = VisitPhase::Complete;
    }
}
