//! Field reference resolution - turns a `FieldRef` into a concrete index

use crate::command::intent::{FieldRef, InputError};
use crate::content::Content;

/// How a reference matched a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    Position,
    ExactId,
    PartialId,
}

/// A resolved field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMatch {
    pub index: usize,
    pub match_reason: MatchReason,
}

/// Resolves field references against the loaded content
pub struct FieldResolver<'a> {
    content: &'a Content,
}

impl<'a> FieldResolver<'a> {
    pub fn new(content: &'a Content) -> Self {
        Self { content }
    }

    /// Resolve a reference, or explain why it names no field
    pub fn resolve(&self, reference: &FieldRef) -> Result<FieldMatch, InputError> {
        match reference {
            FieldRef::Index(index) => {
                if *index < self.content.field_count() {
                    Ok(FieldMatch {
                        index: *index,
                        match_reason: MatchReason::Position,
                    })
                } else {
                    Err(InputError::FieldOutOfRange {
                        number: index + 1,
                        total: self.content.field_count(),
                    })
                }
            }
            FieldRef::Id(id) => self
                .find_by_id(id)
                .ok_or_else(|| InputError::FieldNotFound(id.clone())),
        }
    }

    fn find_by_id(&self, id: &str) -> Option<FieldMatch> {
        if let Some(index) = self.content.index_of(id) {
            return Some(FieldMatch {
                index,
                match_reason: MatchReason::ExactId,
            });
        }

        // Partial match, first in sequence order
        self.content
            .fields()
            .iter()
            .position(|f| f.id.contains(id))
            .map(|index| FieldMatch {
                index,
                match_reason: MatchReason::PartialId,
            })
    }
}
