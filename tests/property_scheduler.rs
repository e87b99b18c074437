use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use taskplan::model::{ProjectId, TaskId, TaskNode};
use taskplan::schedule::generate_global_schedule;
use taskplan_test_utils::builders::{MemorySource, NodeBuilder, project_starting};
use taskplan_test_utils::date;

const OWNERS: [Option<&str>; 4] = [None, Some("a"), Some("b"), Some("c")];

#[derive(Debug, Clone)]
struct GenTask {
    id: TaskId,
    project: ProjectId,
    owner: Option<&'static str>,
    days: u32,
    after: BTreeSet<TaskId>,
}

// Acyclic by construction: task i may only depend on lower-numbered tasks
// of the same project.
fn plan_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<GenTask>> {
    (1..=max_tasks).prop_flat_map(|n| {
        proptest::collection::vec(
            (
                1..=2u64,
                0..OWNERS.len(),
                1..5u32,
                proptest::collection::vec(any::<usize>(), 0..3),
            ),
            n,
        )
        .prop_map(|raw| {
            let mut tasks: Vec<GenTask> = Vec::with_capacity(raw.len());
            for (i, (project, owner, days, deps)) in raw.into_iter().enumerate() {
                let mut after = BTreeSet::new();
                if i > 0 {
                    for d in deps {
                        let prereq = &tasks[d % i];
                        if prereq.project == project {
                            after.insert(prereq.id);
                        }
                    }
                }
                tasks.push(GenTask {
                    id: i as TaskId + 1,
                    project,
                    owner: OWNERS[owner],
                    days,
                    after,
                });
            }
            tasks
        })
    })
}

fn source_for(plan: &[GenTask]) -> MemorySource {
    let mut by_project: HashMap<ProjectId, Vec<TaskNode>> = HashMap::new();
    for t in plan {
        let mut node = NodeBuilder::new(t.id, t.days);
        if let Some(owner) = t.owner {
            node = node.owner(owner);
        }
        for &dep in &t.after {
            node = node.after(dep);
        }
        by_project.entry(t.project).or_default().push(node.build());
    }

    let mut source = MemorySource::new();
    for project in [2, 1] {
        let nodes = by_project.remove(&project).unwrap_or_default();
        source = source.with_project(project_starting(project, "P", "2024-01-01"), nodes);
    }
    source
}

proptest! {
    #[test]
    fn schedule_respects_dependencies_and_assignees(plan in plan_strategy(12)) {
        let source = source_for(&plan);
        let result = generate_global_schedule(&source, date("2024-01-01")).unwrap();

        prop_assert_eq!(result.schedule.len(), plan.len());
        let entries: HashMap<TaskId, _> = result.schedule.iter().map(|e| (e.id, e)).collect();
        prop_assert_eq!(entries.len(), plan.len());

        for t in &plan {
            let e = entries[&t.id];
            prop_assert_eq!(e.project_id, t.project);
            prop_assert!(e.start_date >= date("2024-01-01"));
            prop_assert_eq!((e.end_date - e.start_date).num_days(), i64::from(t.days));

            for dep in &t.after {
                let p = entries[dep];
                prop_assert!(e.start_date >= p.end_date, "task {} starts before {} ends", t.id, dep);
                prop_assert!(e.round > p.round);
            }
        }

        for owner in OWNERS.iter().flatten() {
            let mine: Vec<_> = result.entries_for(owner).collect();
            for (i, a) in mine.iter().enumerate() {
                for b in &mine[i + 1..] {
                    prop_assert!(!a.overlaps(b), "{} double-booked: {} and {}", owner, a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn scheduling_is_deterministic(plan in plan_strategy(12)) {
        let source = source_for(&plan);
        let first = generate_global_schedule(&source, date("2024-01-01")).unwrap();
        let second = generate_global_schedule(&source, date("2024-01-01")).unwrap();
        prop_assert_eq!(first, second);
    }
}
