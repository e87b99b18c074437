use std::error::Error;

use taskplan::errors::TaskplanError;
use taskplan::model::Task;
use taskplan::store::TaskStore;
use taskplan_test_utils::builders::{StoreBuilder, TaskBuilder};

type TestResult = Result<(), Box<dyn Error>>;

/// 1 has subtasks 2 and 3; 2 has subtask 4.
fn tree() -> TaskStore {
    StoreBuilder::new()
        .project(1, "P", "2024-01-01")
        .task(TaskBuilder::new(1, 1))
        .task(TaskBuilder::subtask(2, 1))
        .task(TaskBuilder::subtask(3, 1))
        .task(TaskBuilder::subtask(4, 2))
        .build()
}

fn completed(store: &TaskStore, id: u64) -> bool {
    store.task(id).map(|t| t.completed).unwrap_or(false)
}

#[test]
fn parent_completes_when_last_subtask_completes() -> TestResult {
    let mut store = tree();

    store.set_completed(3, true)?;
    assert!(!completed(&store, 1));

    // Completing 4 derives 2, which in turn derives 1.
    store.set_completed(4, true)?;
    assert!(completed(&store, 2));
    assert!(completed(&store, 1));
    assert!(store.task(1).unwrap().completed_at.is_some());
    Ok(())
}

#[test]
fn reopening_a_subtask_reopens_its_ancestors() -> TestResult {
    let mut store = tree();
    store.set_completed(3, true)?;
    store.set_completed(4, true)?;

    store.set_completed(4, false)?;
    assert!(!completed(&store, 2));
    assert!(!completed(&store, 1));
    assert!(store.task(1).unwrap().completed_at.is_none());
    assert!(completed(&store, 3));
    Ok(())
}

#[test]
fn parent_with_open_subtasks_cannot_be_completed() -> TestResult {
    let mut store = tree();

    assert!(!store.can_mark_complete(1)?);
    match store.set_completed(1, true) {
        Err(TaskplanError::CompletionBlocked { task: 1, reason }) => {
            assert!(reason.contains("subtasks"));
        }
        other => panic!("Expected CompletionBlocked, got: {:?}", other),
    }
    Ok(())
}

#[test]
fn adding_open_subtask_reopens_completed_parent() -> TestResult {
    let mut store = StoreBuilder::new()
        .project(1, "P", "2024-01-01")
        .task(TaskBuilder::new(1, 1))
        .task(TaskBuilder::subtask(2, 1).completed(true))
        .build();
    assert!(completed(&store, 1));

    store.insert_task(TaskBuilder::subtask(3, 1).build())?;
    assert!(!completed(&store, 1));
    Ok(())
}

#[test]
fn subtask_inherits_project_and_privacy() {
    let store = StoreBuilder::new()
        .project(1, "P", "2024-01-01")
        .task(TaskBuilder::new(1, 1).private(true))
        .task(TaskBuilder::subtask(2, 1).private(false))
        .build();

    let child = store.task(2).unwrap();
    assert_eq!(child.project, Some(1));
    assert!(child.private);
}

#[test]
fn completed_at_tracks_completion_flag() -> TestResult {
    let mut store = StoreBuilder::new()
        .project(1, "P", "2024-01-01")
        .task(TaskBuilder::new(1, 1).completed(true))
        .task(TaskBuilder::new(2, 1))
        .build();

    assert!(store.task(1).unwrap().completed_at.is_some());
    assert!(store.task(2).unwrap().completed_at.is_none());

    store.set_completed(1, false)?;
    assert!(store.task(1).unwrap().completed_at.is_none());
    Ok(())
}

#[test]
fn all_subtasks_lists_parents_before_children() {
    let store = tree();

    let ids: Vec<u64> = store.all_subtasks(1).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 4, 3]);

    let direct: Vec<u64> = store.subtasks_of(1).iter().map(|t| t.id).collect();
    assert_eq!(direct, vec![2, 3]);
}

#[test]
fn invalid_tasks_are_rejected() {
    let mut store = StoreBuilder::new()
        .project(1, "P", "2024-01-01")
        .project(2, "Q", "2024-01-01")
        .task(TaskBuilder::new(1, 1))
        .build();

    let zero = store.insert_task(TaskBuilder::new(2, 1).days(0).build());
    assert!(matches!(zero, Err(TaskplanError::InvalidTask { task: 2, .. })));

    let orphan = store.insert_task(Task::new(3, "orphan"));
    match orphan {
        Err(TaskplanError::InvalidTask { reason, .. }) => {
            assert!(reason.contains("project or a parent"));
        }
        other => panic!("Expected InvalidTask, got: {:?}", other),
    }

    let wrong_project = store.insert_task(TaskBuilder::new(4, 2).parent(1).build());
    assert!(matches!(wrong_project, Err(TaskplanError::InvalidTask { task: 4, .. })));

    let missing_parent = store.insert_task(TaskBuilder::subtask(5, 77).build());
    assert!(matches!(missing_parent, Err(TaskplanError::InvalidTask { task: 5, .. })));

    let unknown_project = store.insert_task(TaskBuilder::new(6, 9).build());
    assert!(matches!(unknown_project, Err(TaskplanError::ProjectNotFound(9))));

    let duplicate = store.insert_task(TaskBuilder::new(1, 1).build());
    assert!(matches!(duplicate, Err(TaskplanError::InvalidTask { task: 1, .. })));

    assert_eq!(store.tasks().count(), 1);
}

#[test]
fn unknown_tasks_are_reported() {
    let mut store = tree();

    assert!(matches!(store.set_completed(99, true), Err(TaskplanError::TaskNotFound(99))));
    assert!(matches!(store.mark_started(99), Err(TaskplanError::TaskNotFound(99))));
    assert!(matches!(store.can_mark_complete(99), Err(TaskplanError::TaskNotFound(99))));
}
