//! Structured result of interpreting one command line

use crate::core::types::OptionKey;
use thiserror::Error;

/// What a single input line asks the engine to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show another view
    Navigate(NavTarget),
    /// Move to the field after the active one
    AdvanceCurrentField,
    /// Answer the active field
    Select(OptionKey),
    /// Hand the results to the export sink
    Export,
    /// Open the reset confirmation
    RequestReset,
    ConfirmReset,
    CancelReset,
    /// Malformed command or out-of-range argument
    Error(InputError),
    /// Not a command; carries a message unless the line was blank or a
    /// confirmation word outside the reset view
    Unknown(Option<InputError>),
}

/// Destination of a navigation intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Boot,
    Help,
    Hub,
    Summary,
    Field(FieldRef),
}

/// How a field was named on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    /// Zero-based position in the field sequence
    Index(usize),
    /// A field id or id fragment
    Id(String),
}

/// User-facing input problems; the Display text is the message shown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unrecognized command: {0}. Type 'help'.")]
    UnrecognizedCommand(String),

    #[error("no previous view")]
    NoPreviousView,

    #[error("usage: enter <number>")]
    EnterUsage,

    #[error("field \"{arg}\" not found. Use a number 1-{total}.")]
    FieldArgument { arg: String, total: usize },

    #[error("field \"{0}\" not found")]
    FieldNotFound(String),

    #[error("field {number} is out of range 1-{total}")]
    FieldOutOfRange { number: usize, total: usize },

    #[error("usage: choose <A/B/C/D>")]
    ChooseUsage,

    #[error("options can only be selected inside a field")]
    NotInField,

    #[error("next only works inside a field")]
    NextOutsideField,

    #[error("already at last field, use summary")]
    AlreadyAtLastField,

    #[error("choose an option before recording pledges")]
    NoAnswerYet,

    #[error("pledges for this field are already recorded")]
    PledgesAlreadyRecorded,

    #[error("select at least one pledge or skip")]
    EmptyPledgeSelection,

    #[error("no pledge numbered {0}")]
    UnknownPledge(usize),

    #[error("nothing to confirm")]
    NoPendingReset,

    #[error("input is not valid UTF-8, line ignored")]
    InvalidEncoding,
}

impl Intent {
    /// Message to show for this intent without touching state, if any
    pub fn message(&self) -> Option<String> {
        match self {
            Intent::Error(err) => Some(err.to_string()),
            Intent::Unknown(Some(err)) => Some(err.to_string()),
            _ => None,
        }
    }
}
