//! Panel input handled by the terminal itself
//!
//! The pledge buttons and the quit key are not part of the command language.
//! Lines that match one of them while it is on screen are routed here; all
//! other lines go to the command interpreter.

use crate::engine::{Frame, VisitPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Tick or untick the pledge with this one-based number
    TogglePledge(usize),
    SavePledges,
    SkipPledge,
    Quit,
}

/// Match a line against the panel controls currently on screen
pub fn parse_panel_command(raw: &str, frame: &Frame<'_>) -> Option<PanelCommand> {
    let lowered = raw.trim().to_lowercase();
    let mut tokens = lowered.split_whitespace();
    let command = tokens.next()?;
    let arg = tokens.next();

    if matches!(command, "quit" | "exit") {
        return Some(PanelCommand::Quit);
    }

    let pledge_open = frame
        .visit
        .is_some_and(|v| matches!(v.phase, VisitPhase::Observation | VisitPhase::Pledge));
    if !pledge_open {
        return None;
    }

    match (command, arg) {
        ("pledge", Some(n)) => n.parse().ok().map(PanelCommand::TogglePledge),
        ("save", None) => Some(PanelCommand::SavePledges),
        ("skip", None) => Some(PanelCommand::SkipPledge),
        _ => None,
    }
}
