pub mod config;
pub mod error;
pub mod types;

pub use config::TerminalConfig;
pub use error::{Result, TerminalError};
pub use types::{InterpretationGroup, OptionKey, ViewMode, ViewState};
