//! Free-text command interpreter
//!
//! Maps one raw input line to an `Intent`. Pure and deterministic: the
//! result depends only on the text, the current view and the field count.
//! Deciding what an intent does to the session is the engine's job.

use crate::command::intent::{FieldRef, InputError, Intent, NavTarget};
use crate::core::types::{OptionKey, ViewMode};

/// Field ids start with this; `enter field_03` names a field directly
pub const FIELD_ID_PREFIX: &str = "field_";

/// Interpret one input line
pub fn interpret(raw: &str, current_view: ViewMode, total_fields: usize) -> Intent {
    let lowered = raw.trim().to_lowercase();
    let mut tokens = lowered.split_whitespace();

    let Some(command) = tokens.next() else {
        return Intent::Unknown(None);
    };
    let arg = tokens.next();

    match command {
        "start" | "fields" | "hub" | "status" => Intent::Navigate(NavTarget::Hub),
        "help" => Intent::Navigate(NavTarget::Help),
        "summary" => Intent::Navigate(NavTarget::Summary),
        "export" => Intent::Export,
        "reset" | "restart" => Intent::RequestReset,
        "back" => back_from(current_view),
        "enter" => enter(arg, total_fields),
        "a" | "b" | "c" | "d" => match OptionKey::from_letter(command) {
            Some(option) => Intent::Select(option),
            None => Intent::Unknown(None),
        },
        "choose" | "valitse" => match arg.and_then(OptionKey::from_letter) {
            Some(option) => Intent::Select(option),
            None => Intent::Error(InputError::ChooseUsage),
        },
        "next" => Intent::AdvanceCurrentField,
        "yes" | "confirm" | "kyllä" => {
            if current_view == ViewMode::Reset {
                Intent::ConfirmReset
            } else {
                Intent::Unknown(None)
            }
        }
        "no" | "cancel" | "peruuta" => {
            if current_view == ViewMode::Reset {
                Intent::CancelReset
            } else {
                Intent::Unknown(None)
            }
        }
        other => Intent::Unknown(Some(InputError::UnrecognizedCommand(other.to_string()))),
    }
}

fn back_from(view: ViewMode) -> Intent {
    match view {
        ViewMode::Field | ViewMode::Summary | ViewMode::Help => Intent::Navigate(NavTarget::Hub),
        ViewMode::Hub => Intent::Navigate(NavTarget::Boot),
        ViewMode::Boot | ViewMode::Reset => Intent::Error(InputError::NoPreviousView),
    }
}

fn enter(arg: Option<&str>, total_fields: usize) -> Intent {
    let Some(arg) = arg else {
        return Intent::Error(InputError::EnterUsage);
    };

    if let Ok(number) = arg.parse::<usize>() {
        if (1..=total_fields).contains(&number) {
            return Intent::Navigate(NavTarget::Field(FieldRef::Index(number - 1)));
        }
    }

    if arg.starts_with(FIELD_ID_PREFIX) {
        return Intent::Navigate(NavTarget::Field(FieldRef::Id(arg.to_string())));
    }

    Intent::Error(InputError::FieldArgument {
        arg: arg.to_string(),
        total: total_fields,
    })
}
