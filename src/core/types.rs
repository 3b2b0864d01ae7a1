//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four selectable answers of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    /// Parse a single letter, case-insensitive
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter.to_lowercase().as_str() {
            "a" => Some(Self::A),
            "b" => Some(Self::B),
            "c" => Some(Self::C),
            "d" => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Classification used by observations and the export document
    pub fn interpretation_group(&self) -> InterpretationGroup {
        match self {
            Self::A | Self::B => InterpretationGroup::AB,
            Self::C | Self::D => InterpretationGroup::CD,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived grouping of an answered option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterpretationGroup {
    #[serde(rename = "A_B")]
    AB,
    #[serde(rename = "C_D")]
    CD,
}

impl InterpretationGroup {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AB => "A–B",
            Self::CD => "C–D",
        }
    }
}

/// Views the terminal can show, without the field index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Boot,
    Help,
    Hub,
    Field,
    Summary,
    Reset,
}

/// Active view; `Field` carries the index into the field sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Boot,
    Help,
    Hub,
    Field(usize),
    Summary,
    Reset,
}

impl ViewState {
    pub fn mode(&self) -> ViewMode {
        match self {
            Self::Boot => ViewMode::Boot,
            Self::Help => ViewMode::Help,
            Self::Hub => ViewMode::Hub,
            Self::Field(_) => ViewMode::Field,
            Self::Summary => ViewMode::Summary,
            Self::Reset => ViewMode::Reset,
        }
    }

    /// Index of the active field, if the field view is showing
    pub fn field_index(&self) -> Option<usize> {
        match self {
            Self::Field(idx) => Some(*idx),
            _ => None,
        }
    }
}
