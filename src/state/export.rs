//! Export document generation and delivery

use crate::core::error::{Result, TerminalError};
use crate::core::types::{InterpretationGroup, OptionKey};
use crate::state::progression::ProgressionState;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const EXPORT_VERSION: &str = "1.0";

/// Snapshot of the user's results in the download format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    /// RFC 3339 / ISO-8601 timestamp
    pub exported_at: String,
    pub answers: BTreeMap<String, OptionKey>,
    pub interpretation_group: BTreeMap<String, InterpretationGroup>,
    pub pledges: BTreeMap<String, Vec<String>>,
}

/// Build the export document for a progression record
pub fn export_document(state: &ProgressionState, now: DateTime<Utc>) -> ExportDocument {
    let interpretation_group = state
        .answers
        .iter()
        .map(|(id, option)| (id.clone(), option.interpretation_group()))
        .collect();

    ExportDocument {
        version: EXPORT_VERSION.to_string(),
        exported_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        answers: state.answers.clone(),
        interpretation_group,
        pledges: state.pledges.clone(),
    }
}

/// Receives finished export documents
pub trait ExportSink {
    /// Deliver the document under the suggested filename; returns where it went
    fn deliver(&mut self, document: &ExportDocument, filename: &str) -> Result<String>;
}

/// Writes pretty-printed JSON files into a directory
#[derive(Debug, Clone)]
pub struct FileExportSink {
    dir: PathBuf,
}

impl FileExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for FileExportSink {
    fn deliver(&mut self, document: &ExportDocument, filename: &str) -> Result<String> {
        // A suggested name must not escape the export directory
        if filename.contains(['/', '\\']) || filename == ".." {
            return Err(TerminalError::Export(format!(
                "invalid export filename: {}",
                filename
            )));
        }
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        let json = serde_json::to_string_pretty(document)?;
        std::fs::write(&path, json)?;
        Ok(path.display().to_string())
    }
}

/// Keeps delivered documents in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryExportSink {
    pub delivered: Vec<(String, ExportDocument)>,
}

impl ExportSink for MemoryExportSink {
    fn deliver(&mut self, document: &ExportDocument, filename: &str) -> Result<String> {
        self.delivered.push((filename.to_string(), document.clone()));
        Ok(filename.to_string())
    }
}
