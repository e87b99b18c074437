// src/config/model.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::model::{AssigneeId, ProjectId, TaskId};
use crate::store::TaskStore;
use crate::types::{Condition, Logic};

/// Snapshot of the data the scheduler runs over, as read from TOML.
///
/// ```toml
/// [settings]
/// today = "2024-01-01"
///
/// [[project]]
/// id = 1
/// title = "Launch"
/// start_date = "2024-01-01"
///
/// [[task]]
/// id = 1
/// project = 1
/// owner = "alice"
/// duration_days = 2
///
/// [[task]]
/// id = 2
/// project = 1
/// owner = "alice"
/// duration_days = 3
///
/// [[dependency]]
/// task = 2
/// depends_on = 1
/// condition = "completed"
/// logic = "AND"
/// ```
///
/// Dates are quoted `YYYY-MM-DD` strings. A parent task must be listed
/// before its subtasks. This type is unvalidated; use
/// [`crate::config::load_and_validate`] to obtain a [`Snapshot`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub settings: SettingsSection,

    #[serde(default, rename = "project")]
    pub projects: Vec<ProjectConfig>,

    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskConfig>,

    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<DependencyConfig>,
}

/// `[settings]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsSection {
    /// Date used as "today" for projects without `start_date`.
    ///
    /// If `None`, the caller decides (the CLI uses the local date).
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// `[[project]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub id: ProjectId,

    #[serde(default = "default_project_title")]
    pub title: String,

    #[serde(default)]
    pub owner: Option<AssigneeId>,

    /// If `None`, the project starts "today".
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

fn default_project_title() -> String {
    "Untitled Project".to_string()
}

/// `[[task]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    pub id: TaskId,

    #[serde(default)]
    pub project: Option<ProjectId>,

    /// Parent task; must appear earlier in the file.
    #[serde(default)]
    pub parent: Option<TaskId>,

    #[serde(default = "default_task_title")]
    pub title: String,

    #[serde(default)]
    pub owner: Option<AssigneeId>,

    #[serde(default = "default_duration_days")]
    pub duration_days: u32,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub started: bool,

    #[serde(default)]
    pub private: bool,

    /// RFC3339 timestamp; filled in automatically for completed tasks.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_task_title() -> String {
    "New Task".to_string()
}

fn default_duration_days() -> u32 {
    1
}

/// `[[dependency]]` entry: `task` depends on `depends_on`.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyConfig {
    pub task: TaskId,
    pub depends_on: TaskId,

    #[serde(default)]
    pub condition: Condition,

    #[serde(default)]
    pub logic: Logic,
}

/// A validated snapshot: settings plus a populated store.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub settings: SettingsSection,
    pub store: TaskStore,
}
