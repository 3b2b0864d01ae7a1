//! Command pipeline
//!
//! Raw line -> interpret -> Intent -> (engine) -> FieldResolver for field
//! references -> view transition.

pub mod intent;
pub mod interpreter;
pub mod resolver;

pub use intent::{FieldRef, InputError, Intent, NavTarget};
pub use interpreter::{interpret, FIELD_ID_PREFIX};
pub use resolver::{FieldMatch, FieldResolver, MatchReason};
