// src/schedule/entry.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{AssigneeId, ProjectId, TaskId};

/// One dated, assignee-bound slot of the computed timeline.
///
/// Produced fresh by every scheduling run; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub id: TaskId,
    pub title: String,
    pub start_date: NaiveDate,
    /// Exclusive: `start_date + duration_days`.
    pub end_date: NaiveDate,
    pub assignee: Option<AssigneeId>,
    pub duration_days: u32,
    pub project_id: ProjectId,
    pub project_title: String,
    /// Scheduling round (1-based) in which the task was placed.
    #[serde(skip_serializing)]
    pub round: u32,
}

impl ScheduleEntry {
    /// Whether the half-open `[start, end)` intervals of two entries overlap.
    pub fn overlaps(&self, other: &ScheduleEntry) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }
}

/// The merged timeline of a full run.
///
/// `start_date` / `end_date` are the min start and max end over all entries,
/// and are `None` for an empty schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalSchedule {
    pub schedule: Vec<ScheduleEntry>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl GlobalSchedule {
    /// Sort entries by start date (stable, so ties keep their input order)
    /// and compute the overall bounds.
    pub fn from_entries(mut entries: Vec<ScheduleEntry>) -> Self {
        entries.sort_by_key(|e| e.start_date);
        let start_date = entries.iter().map(|e| e.start_date).min();
        let end_date = entries.iter().map(|e| e.end_date).max();

        Self {
            schedule: entries,
            start_date,
            end_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Entries of one assignee, in timeline order.
    pub fn entries_for<'a>(&'a self, assignee: &'a str) -> impl Iterator<Item = &'a ScheduleEntry> + 'a {
        self.schedule
            .iter()
            .filter(move |e| e.assignee.as_deref() == Some(assignee))
    }
}
