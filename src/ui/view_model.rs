//! Derived data for the hub and summary views

use crate::core::types::{InterpretationGroup, OptionKey};
use crate::engine::Frame;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubRow {
    /// One-based number accepted by `enter`
    pub number: usize,
    pub field_id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubModel {
    pub rows: Vec<HubRow>,
    pub completed: usize,
    pub total: usize,
    /// Summary shortcut is offered once anything is answered
    pub show_summary: bool,
}

pub fn hub_model(frame: &Frame<'_>) -> HubModel {
    let rows: Vec<HubRow> = frame
        .content
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| HubRow {
            number: i + 1,
            field_id: field.id.clone(),
            title: field.title.clone(),
            completed: frame.progression.is_field_completed(&field.id),
        })
        .collect();
    let completed = rows.iter().filter(|r| r.completed).count();

    HubModel {
        total: rows.len(),
        show_summary: completed > 0,
        completed,
        rows,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredField {
    pub number: usize,
    pub title: String,
    pub option: OptionKey,
    pub group: InterpretationGroup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PledgeGroup {
    pub field_title: String,
    pub pledges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryModel {
    pub completed: usize,
    pub total: usize,
    pub answers: Vec<AnsweredField>,
    /// Only fields with at least one saved pledge
    pub pledges: Vec<PledgeGroup>,
    pub end_screen: Vec<String>,
    /// Extra closing lines from the last field that carries them
    pub optional_end_screen: Option<Vec<String>>,
}

impl SummaryModel {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

pub fn summary_model(frame: &Frame<'_>) -> SummaryModel {
    let fields = frame.content.fields();

    let answers: Vec<AnsweredField> = fields
        .iter()
        .enumerate()
        .filter_map(|(i, field)| {
            let option = frame.progression.answer_for(&field.id)?;
            Some(AnsweredField {
                number: i + 1,
                title: field.title.clone(),
                option,
                group: option.interpretation_group(),
            })
        })
        .collect();

    let pledges = fields
        .iter()
        .filter_map(|field| {
            let saved = frame.progression.pledges_for(&field.id)?;
            if saved.is_empty() {
                return None;
            }
            Some(PledgeGroup {
                field_title: field.title.clone(),
                pledges: saved.to_vec(),
            })
        })
        .collect();

    let optional_end_screen = fields
        .iter()
        .rev()
        .find_map(|f| f.optional_end_screen.clone());

    SummaryModel {
        completed: answers.len(),
        total: fields.len(),
        answers,
        pledges,
        end_screen: frame.content.ui_texts.end_screen.lines.clone(),
        optional_end_screen,
    }
}
