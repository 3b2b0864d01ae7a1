//! Terminal configuration with documented defaults
//!
//! Every path and presentation knob the binary needs is collected here.
//! Values come from an optional TOML file; command-line flags override them.

use crate::core::error::{Result, TerminalError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Largest accepted `history_limit`
pub const MAX_HISTORY_LIMIT: usize = 10_000;

/// Configuration for the terminal session
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    // === CONTENT ===
    /// Directory holding `survey.json` and `ui-texts.json`
    pub content_dir: PathBuf,

    // === PERSISTENCE ===
    /// Directory where the progression record and celebration marker live
    ///
    /// Each storage slot becomes one file in this directory.
    pub state_dir: PathBuf,

    // === EXPORT ===
    /// Directory the export sink writes into
    pub export_dir: PathBuf,

    /// Suggested filename for exported results
    pub export_filename: String,

    // === PRESENTATION ===
    /// Maximum number of lines kept in the terminal history
    pub history_limit: usize,

    /// Pause between showing the observation and revealing the pledge step
    pub pledge_pause_ms: u64,

    /// Replace the animated celebration with a short static card
    pub reduced_motion: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("assets"),
            state_dir: PathBuf::from(".operator-state"),
            export_dir: PathBuf::from("."),
            export_filename: "operator-results.json".to_string(),
            history_limit: 50,
            pledge_pause_ms: 100,
            reduced_motion: false,
        }
    }
}

impl TerminalConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TerminalConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.export_filename.trim().is_empty() {
            return Err(TerminalError::Config(
                "export_filename must not be empty".into(),
            ));
        }

        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(TerminalError::Config(format!(
                "history_limit must be between 1 and {}",
                MAX_HISTORY_LIMIT
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TerminalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.export_filename, "operator-results.json");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TerminalConfig::from_toml_str(
            r#"
            state_dir = "/tmp/operator"
            reduced_motion = true
            "#,
        )
        .unwrap();

        assert_eq!(config.state_dir, PathBuf::from("/tmp/operator"));
        assert!(config.reduced_motion);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.content_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_rejects_zero_history() {
        let result = TerminalConfig::from_toml_str("history_limit = 0");
        assert!(matches!(result, Err(TerminalError::Config(_))));
    }

    #[test]
    fn test_rejects_oversized_history() {
        let result = TerminalConfig::from_toml_str("history_limit = 9223372036854775807");
        assert!(matches!(result, Err(TerminalError::Config(_))));

        let config = TerminalConfig::from_toml_str(&format!("history_limit = {}", MAX_HISTORY_LIMIT));
        assert_eq!(config.unwrap().history_limit, MAX_HISTORY_LIMIT);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = TerminalConfig::from_toml_str("history_limit = \"many\"");
        assert!(matches!(result, Err(TerminalError::TomlError(_))));
    }
}
