// src/config/validate.rs

use std::collections::HashSet;

use chrono::Utc;

use crate::config::model::{ProjectConfig, RawSnapshot, Snapshot, TaskConfig};
use crate::errors::{Result, TaskplanError};
use crate::model::{Project, Task};
use crate::store::TaskStore;

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = TaskplanError;

    fn try_from(raw: RawSnapshot) -> std::result::Result<Self, Self::Error> {
        ensure_parents_declared_first(&raw)?;

        let mut store = TaskStore::new();

        for project in &raw.projects {
            store.insert_project(project_from_config(project))?;
        }

        for task in &raw.tasks {
            store.insert_task(task_from_config(task))?;
        }

        for dep in &raw.dependencies {
            store.add_dependency(dep.task, dep.depends_on, dep.condition, dep.logic)?;
        }

        Ok(Snapshot {
            settings: raw.settings,
            store,
        })
    }
}

fn ensure_parents_declared_first(raw: &RawSnapshot) -> Result<()> {
    let all: HashSet<_> = raw.tasks.iter().map(|t| t.id).collect();
    let mut seen = HashSet::new();

    for task in &raw.tasks {
        if let Some(parent) = task.parent {
            if !seen.contains(&parent) && all.contains(&parent) {
                return Err(TaskplanError::ConfigError(format!(
                    "task {} is declared before its parent task {}",
                    task.id, parent
                )));
            }
        }
        seen.insert(task.id);
    }

    Ok(())
}

fn project_from_config(cfg: &ProjectConfig) -> Project {
    Project {
        id: cfg.id,
        owner: cfg.owner.clone(),
        title: cfg.title.clone(),
        start_date: cfg.start_date,
        created_at: Utc::now(),
    }
}

fn task_from_config(cfg: &TaskConfig) -> Task {
    Task {
        id: cfg.id,
        project: cfg.project,
        parent: cfg.parent,
        owner: cfg.owner.clone(),
        title: cfg.title.clone(),
        duration_days: cfg.duration_days,
        completed: cfg.completed,
        started: cfg.started,
        private: cfg.private,
        completed_at: cfg.completed_at,
        created_at: Utc::now(),
    }
}
