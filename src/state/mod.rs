//! Progression model, persistence and export

pub mod export;
pub mod progression;
pub mod storage;

pub use export::{export_document, ExportDocument, ExportSink, FileExportSink, MemoryExportSink};
pub use progression::{ProgressionState, PrunedFields};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Storage, UnavailableStore};
