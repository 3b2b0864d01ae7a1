//! Persisted progression record and its pure merge operations
//!
//! Every merge returns a new record with a refreshed `updated_at`; a
//! `ProgressionState` is never mutated after it has been shared.

use crate::core::types::OptionKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers, pledges and the last-write timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionState {
    /// Field id -> chosen option; presence means answered
    #[serde(default)]
    pub answers: BTreeMap<String, OptionKey>,
    /// Field id -> saved pledges; presence (even empty) means resolved
    #[serde(default)]
    pub pledges: BTreeMap<String, Vec<String>>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Result of `retain_fields` when something was removed
#[derive(Debug, Clone, PartialEq)]
pub struct PrunedFields {
    pub state: ProgressionState,
    pub answers_dropped: usize,
    pub pledges_dropped: usize,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::empty(Utc::now())
    }
}

impl ProgressionState {
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            answers: BTreeMap::new(),
            pledges: BTreeMap::new(),
            updated_at: now,
        }
    }

    /// Record (or replace) the answer for a field
    pub fn with_answer(&self, field_id: &str, option: OptionKey, now: DateTime<Utc>) -> Self {
        let mut answers = self.answers.clone();
        answers.insert(field_id.to_string(), option);
        Self {
            answers,
            pledges: self.pledges.clone(),
            updated_at: now,
        }
    }

    /// Record the pledge list for a field; an empty list marks a skip
    pub fn with_pledges(&self, field_id: &str, pledges: Vec<String>, now: DateTime<Utc>) -> Self {
        let mut all = self.pledges.clone();
        all.insert(field_id.to_string(), pledges);
        Self {
            answers: self.answers.clone(),
            pledges: all,
            updated_at: now,
        }
    }

    /// Drop entries whose field id fails `keep`; `None` if nothing was dropped
    pub fn retain_fields(&self, keep: impl Fn(&str) -> bool) -> Option<PrunedFields> {
        let answers: BTreeMap<_, _> = self
            .answers
            .iter()
            .filter(|(id, _)| keep(id))
            .map(|(id, opt)| (id.clone(), *opt))
            .collect();
        let pledges: BTreeMap<_, _> = self
            .pledges
            .iter()
            .filter(|(id, _)| keep(id))
            .map(|(id, p)| (id.clone(), p.clone()))
            .collect();

        let answers_dropped = self.answers.len() - answers.len();
        let pledges_dropped = self.pledges.len() - pledges.len();
        if answers_dropped == 0 && pledges_dropped == 0 {
            return None;
        }
        Some(PrunedFields {
            state: Self {
                answers,
                pledges,
                updated_at: self.updated_at,
            },
            answers_dropped,
            pledges_dropped,
        })
    }

    pub fn completed_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_field_completed(&self, field_id: &str) -> bool {
        self.answers.contains_key(field_id)
    }

    pub fn answer_for(&self, field_id: &str) -> Option<OptionKey> {
        self.answers.get(field_id).copied()
    }

    pub fn pledges_for(&self, field_id: &str) -> Option<&[String]> {
        self.pledges.get(field_id).map(Vec::as_slice)
    }

    /// Whether the pledge step for this field was saved or skipped
    pub fn is_pledge_resolved(&self, field_id: &str) -> bool {
        self.pledges.contains_key(field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_answer_merge_replaces_record() {
        let original = ProgressionState::empty(at(0));
        let updated = original.with_answer("field_01", OptionKey::B, at(10));

        assert!(original.answers.is_empty());
        assert_eq!(updated.answer_for("field_01"), Some(OptionKey::B));
        assert_eq!(updated.updated_at, at(10));
    }

    #[test]
    fn test_answer_twice_keeps_one_entry() {
        let state = ProgressionState::empty(at(0))
            .with_answer("field_01", OptionKey::A, at(1))
            .with_answer("field_01", OptionKey::A, at(2));

        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.answer_for("field_01"), Some(OptionKey::A));
    }

    #[test]
    fn test_skip_resolves_pledge_step() {
        let state = ProgressionState::empty(at(0)).with_pledges("field_02", Vec::new(), at(5));

        assert!(state.is_pledge_resolved("field_02"));
        assert_eq!(state.pledges_for("field_02"), Some(&[][..]));
        assert!(!state.is_field_completed("field_02"));
    }

    #[test]
    fn test_retain_fields_drops_stale_ids() {
        let state = ProgressionState::empty(at(0))
            .with_answer("field_01", OptionKey::A, at(1))
            .with_answer("old_field", OptionKey::C, at(2))
            .with_pledges("old_field", vec!["x".into()], at(3));

        let pruned = state.retain_fields(|id| id.starts_with("field_")).unwrap();
        assert_eq!(pruned.answers_dropped, 1);
        assert_eq!(pruned.pledges_dropped, 1);
        assert_eq!(pruned.state.completed_count(), 1);
        assert!(pruned.state.pledges.is_empty());

        assert!(pruned.state.retain_fields(|id| id.starts_with("field_")).is_none());
    }

    #[test]
    fn test_retain_fields_counts_pledge_only_drops() {
        let state = ProgressionState::empty(at(0))
            .with_answer("field_01", OptionKey::B, at(1))
            .with_pledges("old_field", Vec::new(), at(2));

        let pruned = state.retain_fields(|id| id.starts_with("field_")).unwrap();
        assert_eq!(pruned.answers_dropped, 0);
        assert_eq!(pruned.pledges_dropped, 1);
        assert!(!pruned.state.is_pledge_resolved("old_field"));
    }

    #[test]
    fn test_deserialize_tolerates_missing_keys() {
        let state: ProgressionState = serde_json::from_str(r#"{"answers":{"field_01":"D"}}"#).unwrap();
        assert_eq!(state.answer_for("field_01"), Some(OptionKey::D));
        assert!(state.pledges.is_empty());
    }
}
