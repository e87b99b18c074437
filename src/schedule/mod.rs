// src/schedule/mod.rs

//! Global scheduling across projects.
//!
//! Projects are scheduled one after another in ascending id order. A single
//! [`AssigneeAvailability`] map is created per run and threaded through every
//! project, so work placed in an earlier project blocks its assignee in later
//! ones. The combined entries are then sorted by start date.
//!
//! A run is all-or-nothing: any error (typically a cycle in one project)
//! fails the whole run and no partial schedule is returned.

pub mod entry;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::dag::{AssigneeAvailability, schedule_project};
use crate::errors::{Result, TaskplanError};
use crate::model::{Project, ProjectId, TaskNode};

pub use entry::{GlobalSchedule, ScheduleEntry};

/// Read access to the project/task data the scheduler runs over.
///
/// Implementations must hand out a consistent snapshot for the duration of
/// one run.
pub trait ScheduleSource {
    /// All projects, in any order.
    fn projects(&self) -> Vec<&Project>;

    /// Lookup a single project.
    fn project(&self, id: ProjectId) -> Option<&Project>;

    /// Tasks of a project with their outbound dependency edges, in a stable
    /// order (this order drives tie-breaking).
    fn project_tasks(&self, project: ProjectId) -> Result<Vec<TaskNode>>;
}

/// Schedule every project of `source` into one timeline.
///
/// `today` is the start date of projects that have none.
pub fn generate_global_schedule<S>(source: &S, today: NaiveDate) -> Result<GlobalSchedule>
where
    S: ScheduleSource + ?Sized,
{
    let mut projects = source.projects();
    projects.sort_by_key(|p| p.id);

    info!(projects = projects.len(), %today, "generating global schedule");

    let result = schedule_projects(source, &projects, today);
    match result {
        Ok(entries) => {
            let schedule = GlobalSchedule::from_entries(entries);
            info!(
                entries = schedule.schedule.len(),
                start = ?schedule.start_date,
                end = ?schedule.end_date,
                "global schedule generated"
            );
            Ok(schedule)
        }
        Err(err) => {
            error!(error = %err, "global schedule generation failed");
            Err(err)
        }
    }
}

fn schedule_projects<S>(
    source: &S,
    projects: &[&Project],
    today: NaiveDate,
) -> Result<Vec<ScheduleEntry>>
where
    S: ScheduleSource + ?Sized,
{
    let mut availability = AssigneeAvailability::new();
    let mut entries = Vec::new();

    for project in projects {
        let tasks = source.project_tasks(project.id)?;
        let start = project.effective_start(today);
        let mut scheduled = schedule_project(project, start, &tasks, &mut availability)?;
        entries.append(&mut scheduled);
    }

    Ok(entries)
}

/// Schedule a single project with fresh assignee availability.
///
/// Entries are returned in placement order.
pub fn generate_project_schedule<S>(
    source: &S,
    project: &Project,
    today: NaiveDate,
) -> Result<Vec<ScheduleEntry>>
where
    S: ScheduleSource + ?Sized,
{
    let tasks = source.project_tasks(project.id)?;
    let mut availability = AssigneeAvailability::new();
    schedule_project(
        project,
        project.effective_start(today),
        &tasks,
        &mut availability,
    )
}

/// [`generate_project_schedule`] by project id.
pub fn generate_project_schedule_by_id<S>(
    source: &S,
    project: ProjectId,
    today: NaiveDate,
) -> Result<Vec<ScheduleEntry>>
where
    S: ScheduleSource + ?Sized,
{
    let project = source
        .project(project)
        .ok_or(TaskplanError::ProjectNotFound(project))?;
    generate_project_schedule(source, project, today)
}
