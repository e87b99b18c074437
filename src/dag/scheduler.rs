// src/dag/scheduler.rs

//! Single-project, resource-constrained topological scheduler.
//!
//! A "parallel Kahn" pass: tasks become ready once all in-project
//! prerequisites are placed, and ready tasks are placed round by round.
//!
//! - A round takes a snapshot of the ready queue. Each assignee starts at
//!   most one task per round; further ready tasks for the same assignee are
//!   deferred to the front of the next round, so discovery order is kept.
//! - An assigned task starts at the latest of the project start, the
//!   assignee's next free date and the end of its latest prerequisite.
//!   The assignee is then busy until the task ends.
//! - Unassigned tasks run one after another on the project's sequential
//!   cursor, never in parallel with each other.
//!
//! Ties are broken FIFO: zero in-degree tasks seed the queue in input order
//! and dependents are appended as their last prerequisite is placed.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{Days, NaiveDate};
use tracing::{debug, error};

use crate::dag::availability::AssigneeAvailability;
use crate::dag::cycle::ensure_acyclic;
use crate::dag::graph::DependencyGraph;
use crate::errors::{Result, TaskplanError};
use crate::model::{Project, TaskId, TaskNode};
use crate::schedule::ScheduleEntry;

/// Result of a single scheduling round; lets tests step the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundStep {
    pub round: u32,
    /// Tasks placed in this round, in placement order.
    pub scheduled: Vec<TaskId>,
    /// Ready tasks pushed to the next round because their assignee already
    /// started a task in this one.
    pub deferred: Vec<TaskId>,
}

/// Per-project scheduling state.
#[derive(Debug)]
pub struct ProjectScheduler<'a> {
    project: &'a Project,
    start: NaiveDate,
    graph: DependencyGraph<'a>,
    in_degree: HashMap<TaskId, usize>,
    ready: VecDeque<TaskId>,
    /// Latest end date among the already placed prerequisites of a task.
    prerequisites_end: HashMap<TaskId, NaiveDate>,
    /// Sequential cursor for unassigned work.
    cursor: NaiveDate,
    round: u32,
    placed: HashSet<TaskId>,
    entries: Vec<ScheduleEntry>,
}

impl<'a> ProjectScheduler<'a> {
    /// Build the graph, reject cycles and seed the ready queue.
    pub fn new(project: &'a Project, start: NaiveDate, tasks: &'a [TaskNode]) -> Result<Self> {
        let graph = DependencyGraph::from_tasks(tasks);
        ensure_acyclic(&graph)?;

        let in_degree = graph.in_degrees();
        let ready: VecDeque<TaskId> = graph
            .tasks()
            .filter(|id| in_degree.get(id).copied().unwrap_or(0) == 0)
            .collect();

        debug!(
            project = project.id,
            tasks = graph.len(),
            roots = ready.len(),
            %start,
            "project graph built"
        );

        Ok(Self {
            project,
            start,
            in_degree,
            ready,
            prerequisites_end: HashMap::new(),
            cursor: start,
            round: 0,
            placed: HashSet::with_capacity(graph.len()),
            entries: Vec::with_capacity(graph.len()),
            graph,
        })
    }

    /// `true` once the ready queue is drained.
    pub fn is_done(&self) -> bool {
        self.ready.is_empty()
    }

    /// Entries placed so far, in placement order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Run one round against the shared availability map.
    pub fn step(&mut self, availability: &mut AssigneeAvailability) -> Result<RoundStep> {
        self.round += 1;
        let mut step = RoundStep {
            round: self.round,
            ..RoundStep::default()
        };

        let mut started: HashSet<&str> = HashSet::new();
        let batch = self.ready.len();

        for _ in 0..batch {
            let Some(id) = self.ready.pop_front() else {
                break;
            };
            let Some(task) = self.graph.task(id) else {
                continue;
            };

            if let Some(owner) = task.owner.as_deref() {
                if !started.insert(owner) {
                    step.deferred.push(id);
                    continue;
                }
            }

            self.place(task, availability)?;
            step.scheduled.push(id);
        }

        // Deferred tasks were discovered before anything enqueued this round.
        for &id in step.deferred.iter().rev() {
            self.ready.push_front(id);
        }

        Ok(step)
    }

    /// Drain the ready queue and return the project's entries.
    pub fn run(mut self, availability: &mut AssigneeAvailability) -> Result<Vec<ScheduleEntry>> {
        while !self.is_done() {
            self.step(availability)?;
        }

        if self.placed.len() < self.graph.len() {
            let pending: Vec<TaskId> = self
                .graph
                .tasks()
                .filter(|id| !self.placed.contains(id))
                .collect();
            error!(
                project = self.project.id,
                ?pending,
                "ready queue drained with unscheduled tasks"
            );
            return Err(TaskplanError::SchedulerStalled {
                project: self.project.id,
                pending,
            });
        }

        Ok(self.entries)
    }

    fn place(&mut self, task: &TaskNode, availability: &mut AssigneeAvailability) -> Result<()> {
        let not_before = self
            .prerequisites_end
            .get(&task.id)
            .map_or(self.start, |&end| end.max(self.start));

        let (start_date, end_date) = match task.owner.as_deref() {
            Some(owner) => {
                let start = availability.earliest_start(owner, not_before);
                let end = add_days(start, task)?;
                availability.reserve(owner, end);
                (start, end)
            }
            None => {
                let start = self.cursor.max(not_before);
                let end = add_days(start, task)?;
                self.cursor = end;
                (start, end)
            }
        };

        debug!(
            project = self.project.id,
            task = task.id,
            assignee = task.owner.as_deref().unwrap_or("-"),
            round = self.round,
            %start_date,
            %end_date,
            "scheduled task"
        );

        self.entries.push(ScheduleEntry {
            id: task.id,
            title: task.title.clone(),
            start_date,
            end_date,
            assignee: task.owner.clone(),
            duration_days: task.duration_days,
            project_id: self.project.id,
            project_title: self.project.title.clone(),
            round: self.round,
        });
        self.placed.insert(task.id);

        for &dependent in self.graph.dependents_of(task.id) {
            self.prerequisites_end
                .entry(dependent)
                .and_modify(|d| *d = (*d).max(end_date))
                .or_insert(end_date);

            if let Some(remaining) = self.in_degree.get_mut(&dependent) {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    self.ready.push_back(dependent);
                }
            }
        }

        Ok(())
    }
}

fn add_days(start: NaiveDate, task: &TaskNode) -> Result<NaiveDate> {
    start
        .checked_add_days(Days::new(u64::from(task.duration_days)))
        .ok_or(TaskplanError::DateOverflow { task: task.id })
}

/// Schedule one project's tasks, updating `availability` in place.
///
/// An empty task list yields an empty schedule. A cycle anywhere in the
/// project fails the whole call.
pub fn schedule_project(
    project: &Project,
    start: NaiveDate,
    tasks: &[TaskNode],
    availability: &mut AssigneeAvailability,
) -> Result<Vec<ScheduleEntry>> {
    if tasks.is_empty() {
        return Ok(Vec::new());
    }
    ProjectScheduler::new(project, start, tasks)?.run(availability)
}
