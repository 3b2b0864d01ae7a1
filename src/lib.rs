//! Operator Terminal - command-driven survey terminal

pub mod command;
pub mod content;
pub mod core;
pub mod engine;
pub mod state;
pub mod ui;
