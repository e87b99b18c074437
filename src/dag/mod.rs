// src/dag/mod.rs

//! Dependency graph handling and per-project scheduling.
//!
//! - [`graph`] turns a project's tasks and their edges into adjacency lists
//!   and in-degree counts.
//! - [`cycle`] rejects cyclic graphs before any scheduling happens.
//! - [`groups`] resolves AND/OR group ids and evaluates group satisfaction.
//! - [`availability`] tracks when each assignee is next free.
//! - [`scheduler`] runs the round-based topological pass over one project.

pub mod availability;
pub mod cycle;
pub mod graph;
pub mod groups;
pub mod scheduler;

pub use availability::AssigneeAvailability;
pub use cycle::{ensure_acyclic, find_cycle};
pub use graph::DependencyGraph;
pub use groups::{DependencyGroup, TargetState, all_groups_satisfied, group_edges, resolve_group};
pub use scheduler::{ProjectScheduler, RoundStep, schedule_project};
