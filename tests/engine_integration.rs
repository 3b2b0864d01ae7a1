//! Integration tests for the survey engine
//!
//! These tests drive the engine through raw command lines against the
//! bundled content in `assets/`:
//! - Answering a field and saving pledges
//! - Completion celebration firing once per progression lifetime
//! - Reset clearing answers, pledges and the celebration marker
//! - Field references in `enter`
//! - Export documents

use operator_terminal::command::{interpret, FieldRef, InputError, Intent, NavTarget};
use operator_terminal::content::{ContentCache, ContentHandle, DirectorySource};
use operator_terminal::core::types::{InterpretationGroup, OptionKey, ViewMode, ViewState};
use operator_terminal::engine::{NoticeKind, SurveyEngine, VisitPhase};
use operator_terminal::state::{MemoryExportSink, MemoryStore, Storage};
use proptest::prelude::*;
use std::path::PathBuf;

fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn bundled_content() -> ContentHandle {
    ContentCache::new()
        .get_or_load(&DirectorySource::new(assets_dir()))
        .expect("bundled content should load")
}

fn new_engine() -> SurveyEngine<MemoryStore, MemoryExportSink> {
    SurveyEngine::new(
        bundled_content(),
        Storage::new(MemoryStore::new()),
        MemoryExportSink::default(),
        "operator-results.json",
    )
}

/// Answer every field with the given option, skipping pledges
fn answer_all(engine: &mut SurveyEngine<MemoryStore, MemoryExportSink>, option: &str) {
    let total = engine.content().field_count();
    for i in 1..=total {
        engine.handle_line(&format!("enter {}", i));
        engine.handle_line(option);
    }
}

// ============================================================================
// Content
// ============================================================================

/// The bundled survey loads and every field carries four options and pledges
#[test]
fn test_bundled_content_is_complete() {
    let content = bundled_content();
    assert_eq!(content.field_count(), 6);

    for (i, field) in content.fields().iter().enumerate() {
        assert_eq!(field.id, format!("field_{:02}", i + 1));
        assert_eq!(field.options.len(), 4);
        assert!(!field.pledge.choices.is_empty());
    }
    assert!(content.fields().last().unwrap().optional_end_screen.is_some());
}

// ============================================================================
// Field Workflow
// ============================================================================

/// Integration test: answer a field and save pledges
///
/// 1. Enter field 1 from the hub
/// 2. Choose option A
/// 3. Tick two pledges and save
/// 4. Verify the stored answer, pledges and visit phase
#[test]
fn test_answer_and_pledge_workflow() {
    let mut engine = new_engine();
    engine.handle_line("start");
    assert_eq!(engine.view(), ViewState::Hub);

    engine.handle_line("enter 1");
    assert_eq!(engine.view(), ViewState::Field(0));

    let outcome = engine.handle_line("a");
    assert_eq!(outcome.notices[0].text, "You chose option A");
    assert_eq!(engine.visit().unwrap().phase, VisitPhase::Observation);

    engine.reveal_pledge_step();
    engine.toggle_pledge(1);
    engine.toggle_pledge(3);
    let outcome = engine.save_pledge_draft();
    assert_eq!(outcome.notices[0].kind, NoticeKind::Success);

    let progression = engine.progression();
    let field = engine.content().field(0).unwrap();
    assert_eq!(progression.answer_for(&field.id), Some(OptionKey::A));
    assert_eq!(
        progression.pledges_for(&field.id).unwrap(),
        &[field.pledge.choices[0].clone(), field.pledge.choices[2].clone()]
    );
    assert_eq!(engine.visit().unwrap().phase, VisitPhase::Complete);
}

/// Changing an answer overwrites it without adding a second entry
#[test]
fn test_reanswer_overwrites() {
    let mut engine = new_engine();
    engine.handle_line("enter 2");
    engine.handle_line("b");
    engine.handle_line("choose d");

    let progression = engine.progression();
    assert_eq!(progression.completed_count(), 1);
    assert_eq!(progression.answer_for("field_02"), Some(OptionKey::D));
}

/// `next` walks the fields in order and stops at the last one
#[test]
fn test_next_stops_at_last_field() {
    let mut engine = new_engine();
    engine.handle_line("enter 5");
    engine.handle_line("next");
    assert_eq!(engine.view(), ViewState::Field(5));

    let outcome = engine.handle_line("next");
    assert_eq!(engine.view(), ViewState::Field(5));
    assert_eq!(
        outcome.notices[0].text,
        InputError::AlreadyAtLastField.to_string()
    );
}

/// Selecting outside a field is rejected and changes nothing
#[test]
fn test_select_outside_field_rejected() {
    let mut engine = new_engine();
    engine.handle_line("start");
    let outcome = engine.handle_line("a");

    assert_eq!(outcome.notices[0].kind, NoticeKind::Error);
    assert_eq!(engine.progression().completed_count(), 0);
    assert_eq!(engine.view(), ViewState::Hub);
}

// ============================================================================
// Completion Celebration
// ============================================================================

/// Integration test: celebration fires once when the last field is answered
///
/// Re-answering afterwards does not fire again, and a finished token moves
/// the view to the summary only the first time it comes back.
#[test]
fn test_celebration_fires_once() {
    let mut engine = new_engine();
    let total = engine.content().field_count();

    for i in 1..total {
        engine.handle_line(&format!("enter {}", i));
        let outcome = engine.handle_line("c");
        assert!(outcome.celebration.is_none());
    }

    engine.handle_line(&format!("enter {}", total));
    let outcome = engine.handle_line("a");
    let token = outcome.celebration.expect("last answer should celebrate");
    assert!(engine.celebration_shown());

    let outcome = engine.handle_line("b");
    assert!(outcome.celebration.is_none());

    assert!(engine.finish_celebration(token));
    assert_eq!(engine.view(), ViewState::Summary);
}

/// A token from before a reset is ignored
#[test]
fn test_reset_discards_pending_celebration() {
    let mut engine = new_engine();
    let total = engine.content().field_count();
    for i in 1..total {
        engine.handle_line(&format!("enter {}", i));
        engine.handle_line("a");
    }
    engine.handle_line(&format!("enter {}", total));
    let token = engine.handle_line("a").celebration.unwrap();

    engine.handle_line("reset");
    engine.handle_line("confirm");

    assert!(!engine.finish_celebration(token));
    assert_eq!(engine.view(), ViewState::Boot);
}

// ============================================================================
// Reset
// ============================================================================

/// Integration test: reset clears progress and allows a second celebration
#[test]
fn test_reset_round_trip() {
    let mut engine = new_engine();
    answer_all(&mut engine, "d");
    assert!(engine.celebration_shown());

    engine.handle_line("reset");
    assert_eq!(engine.view(), ViewState::Reset);
    engine.handle_line("cancel");
    assert_eq!(engine.view(), ViewState::Hub);
    assert_eq!(engine.progression().completed_count(), 6);

    engine.handle_line("reset");
    let outcome = engine.handle_line("yes");
    assert_eq!(outcome.notices[0].text, "Progress reset");
    assert_eq!(engine.progression().completed_count(), 0);
    assert!(!engine.celebration_shown());
    assert!(engine.storage().load_state().unwrap().answers.is_empty());
    assert!(!engine.storage().celebration_shown().unwrap());

    let total = engine.content().field_count();
    for i in 1..total {
        engine.handle_line(&format!("enter {}", i));
        engine.handle_line("b");
    }
    engine.handle_line(&format!("enter {}", total));
    assert!(engine.handle_line("b").celebration.is_some());
}

/// Confirm without a pending reset is ignored
#[test]
fn test_confirm_without_reset_request() {
    let mut engine = new_engine();
    engine.handle_line("enter 1");
    engine.handle_line("a");

    let outcome = engine.handle_line("confirm");
    assert!(outcome.notices.is_empty());
    assert_eq!(engine.view(), ViewState::Field(0));
    assert_eq!(engine.progression().completed_count(), 1);
}

// ============================================================================
// Field References
// ============================================================================

/// Field ids resolve the same as their numbers
#[test]
fn test_enter_by_id() {
    let mut engine = new_engine();
    engine.handle_line("enter field_04");
    assert_eq!(engine.view(), ViewState::Field(3));

    let outcome = engine.handle_line("enter field_99");
    assert_eq!(outcome.notices[0].kind, NoticeKind::Error);
    assert_eq!(engine.view(), ViewState::Field(3));
}

proptest! {
    /// `enter n` maps to index n-1 for every in-range n
    #[test]
    fn prop_enter_number_maps_to_index(total in 1usize..40, pick in 0usize..40) {
        let idx = pick % total;
        let intent = interpret(&format!("enter {}", idx + 1), ViewMode::Hub, total);
        prop_assert_eq!(intent, Intent::Navigate(NavTarget::Field(FieldRef::Index(idx))));
    }

    /// Zero and numbers past the end are rejected
    #[test]
    fn prop_enter_out_of_range_rejected(total in 1usize..40, extra in 1usize..100) {
        let zero = interpret("enter 0", ViewMode::Hub, total);
        let past_end = interpret(&format!("enter {}", total + extra), ViewMode::Hub, total);
        prop_assert!(matches!(zero, Intent::Error(_)));
        prop_assert!(matches!(past_end, Intent::Error(_)));
    }
}

// ============================================================================
// Export
// ============================================================================

/// Integration test: export carries answers, groups and pledges
#[test]
fn test_export_document_contents() {
    let mut engine = new_engine();
    engine.handle_line("enter 1");
    engine.handle_line("b");
    engine.skip_pledge();
    engine.handle_line("enter 3");
    engine.handle_line("c");
    engine.reveal_pledge_step();
    engine.toggle_pledge(2);
    engine.save_pledge_draft();

    let outcome = engine.handle_line("export");
    assert_eq!(
        outcome.notices[0].text,
        "Results saved: operator-results.json"
    );

    let (filename, doc) = &engine.sink().delivered[0];
    assert_eq!(filename, "operator-results.json");
    assert_eq!(doc.version, "1.0");
    assert_eq!(doc.answers.len(), 2);
    assert_eq!(doc.interpretation_group["field_01"], InterpretationGroup::AB);
    assert_eq!(doc.interpretation_group["field_03"], InterpretationGroup::CD);
    assert_eq!(doc.pledges["field_01"], Vec::<String>::new());
    assert_eq!(doc.pledges["field_03"].len(), 1);
    assert!(doc.exported_at.ends_with('Z'));
}
