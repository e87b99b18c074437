// src/dag/cycle.rs

//! Cycle detection over a [`DependencyGraph`].
//!
//! Depth-first search driven by an explicit work stack, so deep chains do
//! not grow the call stack. A node is `OnPath` while it sits on the current
//! DFS path and `Done` once all of its dependents have been explored;
//! reaching an `OnPath` node again closes a cycle.

use std::collections::HashMap;

use tracing::error;

use crate::dag::graph::DependencyGraph;
use crate::errors::{Result, TaskplanError};
use crate::model::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Done,
}

/// Fail with [`TaskplanError::CyclicDependency`] if the graph has a cycle.
pub fn ensure_acyclic(graph: &DependencyGraph<'_>) -> Result<()> {
    match find_cycle(graph) {
        None => Ok(()),
        Some(cycle) => {
            let task = cycle[0];
            error!(task, ?cycle, "circular dependency detected");
            Err(TaskplanError::CyclicDependency { task, cycle })
        }
    }
}

/// Return the first cycle found, as a path that starts and ends on the same
/// task (e.g. `[a, b, c, a]`), or `None` for an acyclic graph.
pub fn find_cycle(graph: &DependencyGraph<'_>) -> Option<Vec<TaskId>> {
    let mut marks: HashMap<TaskId, Mark> = HashMap::with_capacity(graph.len());

    for root in graph.tasks() {
        if marks.contains_key(&root) {
            continue;
        }

        // Each frame is (node, index of the next dependent to visit).
        let mut stack: Vec<(TaskId, usize)> = vec![(root, 0)];
        marks.insert(root, Mark::OnPath);

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let dependents = graph.dependents_of(node);

            if next >= dependents.len() {
                marks.insert(node, Mark::Done);
                stack.pop();
                continue;
            }

            frame.1 += 1;
            let child = dependents[next];

            match marks.get(&child) {
                Some(Mark::OnPath) => {
                    let start = stack
                        .iter()
                        .position(|&(id, _)| id == child)
                        .unwrap_or(0);
                    let mut cycle: Vec<TaskId> = stack[start..].iter().map(|&(id, _)| id).collect();
                    cycle.push(child);
                    return Some(cycle);
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(child, Mark::OnPath);
                    stack.push((child, 0));
                }
            }
        }
    }

    None
}
