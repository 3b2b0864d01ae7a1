//! Integration tests for file-backed persistence
//!
//! Progress and the celebration marker are written to a state directory and
//! must survive a restart, which here means building a second engine over
//! the same directory.

use operator_terminal::content::{ContentCache, ContentHandle, DirectorySource};
use operator_terminal::core::types::{OptionKey, ViewState};
use operator_terminal::engine::{SurveyEngine, VisitPhase};
use operator_terminal::state::storage::STATE_KEY;
use operator_terminal::state::{
    ExportDocument, ExportSink, FileExportSink, FileStore, KeyValueStore, MemoryExportSink,
    Storage,
};
use std::path::{Path, PathBuf};

fn bundled_content() -> ContentHandle {
    let assets = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    ContentCache::new()
        .get_or_load(&DirectorySource::new(assets))
        .expect("bundled content should load")
}

fn engine_at(dir: &Path) -> SurveyEngine<FileStore, MemoryExportSink> {
    SurveyEngine::new(
        bundled_content(),
        Storage::new(FileStore::new(dir)),
        MemoryExportSink::default(),
        "operator-results.json",
    )
}

// ============================================================================
// Restart
// ============================================================================

/// Integration test: progress survives a restart
///
/// 1. Answer two fields, saving pledges on one
/// 2. Build a new engine over the same state directory
/// 3. Verify answers and pledges are restored and the visit resumes complete
#[test]
fn test_progress_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut engine = engine_at(dir.path());
        engine.handle_line("enter 1");
        engine.handle_line("c");
        engine.reveal_pledge_step();
        engine.toggle_pledge(2);
        engine.save_pledge_draft();
        engine.handle_line("enter 2");
        engine.handle_line("a");
    }

    let mut engine = engine_at(dir.path());
    let progression = engine.progression();
    assert_eq!(progression.completed_count(), 2);
    assert_eq!(progression.answer_for("field_01"), Some(OptionKey::C));
    assert_eq!(progression.pledges_for("field_01").map(|p| p.len()), Some(1));
    assert_eq!(engine.view(), ViewState::Boot);

    engine.handle_line("enter 1");
    assert_eq!(engine.visit().unwrap().phase, VisitPhase::Complete);

    engine.handle_line("enter 2");
    assert_eq!(engine.visit().unwrap().phase, VisitPhase::Pledge);
}

/// The celebration marker keeps a finished survey from celebrating again
#[test]
fn test_celebration_marker_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut engine = engine_at(dir.path());
        let total = engine.content().field_count();
        let mut celebrated = false;
        for i in 1..=total {
            engine.handle_line(&format!("enter {}", i));
            celebrated |= engine.handle_line("b").celebration.is_some();
        }
        assert!(celebrated);
    }

    let mut engine = engine_at(dir.path());
    assert!(engine.celebration_shown());
    engine.handle_line("enter 6");
    assert!(engine.handle_line("a").celebration.is_none());
}

/// A corrupt record is discarded and the session starts empty
#[test]
fn test_corrupt_record_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set(STATE_KEY, "{not json").unwrap();

    let engine = engine_at(dir.path());
    assert_eq!(engine.progression().completed_count(), 0);
}

// ============================================================================
// Reset
// ============================================================================

/// Integration test: reset removes both slots from disk
#[test]
fn test_reset_removes_files() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut engine = engine_at(dir.path());
        for i in 1..=6 {
            engine.handle_line(&format!("enter {}", i));
            engine.handle_line("d");
        }
        engine.handle_line("reset");
        engine.handle_line("yes");
    }

    let storage = Storage::new(FileStore::new(dir.path()));
    assert!(storage.load_state().unwrap().answers.is_empty());
    assert!(!storage.celebration_shown().unwrap());
    assert!(storage.backend().get(STATE_KEY).unwrap().is_none());
}

// ============================================================================
// Export
// ============================================================================

/// The file sink writes a readable document and refuses path escapes
#[test]
fn test_file_export_sink() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = SurveyEngine::new(
        bundled_content(),
        Storage::new(FileStore::new(dir.path().join("state"))),
        FileExportSink::new(dir.path().join("out")),
        "operator-results.json",
    );
    engine.handle_line("enter 3");
    engine.handle_line("a");
    engine.handle_line("export");

    let written = std::fs::read_to_string(dir.path().join("out/operator-results.json")).unwrap();
    let doc: ExportDocument = serde_json::from_str(&written).unwrap();
    assert_eq!(doc.answers["field_03"], OptionKey::A);

    let mut sink = FileExportSink::new(dir.path());
    assert!(sink.deliver(&doc, "../escape.json").is_err());
}
