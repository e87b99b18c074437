// src/dag/availability.rs

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::AssigneeId;

/// Next date each assignee is free to start new work.
///
/// One instance lives for one top-level scheduling run and is threaded
/// through every project scheduled in that run, so an assignee busy in an
/// earlier project is unavailable in later ones. Dates only move forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssigneeAvailability {
    next_free: HashMap<AssigneeId, NaiveDate>,
}

impl AssigneeAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next free date of `assignee`, or `None` if they have no work yet.
    pub fn next_free(&self, assignee: &str) -> Option<NaiveDate> {
        self.next_free.get(assignee).copied()
    }

    /// Earliest date `assignee` can start work that is itself not allowed to
    /// start before `not_before`.
    pub fn earliest_start(&self, assignee: &str, not_before: NaiveDate) -> NaiveDate {
        self.next_free(assignee)
            .map_or(not_before, |free| free.max(not_before))
    }

    /// Mark `assignee` busy until `until` (exclusive).
    pub fn reserve(&mut self, assignee: &str, until: NaiveDate) {
        self.next_free
            .entry(assignee.to_string())
            .and_modify(|d| *d = (*d).max(until))
            .or_insert(until);
    }

    pub fn len(&self) -> usize {
        self.next_free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next_free.is_empty()
    }
}
