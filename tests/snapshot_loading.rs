use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use taskplan::config::{load_and_validate, load_from_path};
use taskplan::errors::TaskplanError;
use taskplan::schedule::generate_global_schedule;
use taskplan::types::{Condition, Logic};
use taskplan_test_utils::{date, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

fn write_snapshot(dir: &Path, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("Taskplan.toml");
    fs::write(&path, contents)?;
    Ok(path)
}

const LAUNCH: &str = r#"
[settings]
today = "2024-03-01"

[[project]]
id = 1
title = "Launch"
start_date = "2024-01-01"

[[project]]
id = 2
title = "Later"

[[task]]
id = 1
project = 1
owner = "u1"
duration_days = 2

[[task]]
id = 2
project = 1
owner = "u1"
duration_days = 3

[[task]]
id = 3
project = 1
owner = "u2"

[[task]]
id = 4
project = 1
title = "Review"

[[task]]
id = 5
project = 2
owner = "u1"
duration_days = 2

[[dependency]]
task = 4
depends_on = 1

[[dependency]]
task = 4
depends_on = 3
logic = "AND"
condition = "completed"
"#;

#[test]
fn snapshot_loads_into_store_with_defaults() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = write_snapshot(dir.path(), LAUNCH)?;
    let snapshot = load_and_validate(&path)?;

    assert_eq!(snapshot.settings.today, Some(date("2024-03-01")));

    let store = &snapshot.store;
    assert_eq!(store.projects().count(), 2);
    assert_eq!(store.project(2).unwrap().start_date, None);

    let review = store.task(4).unwrap();
    assert_eq!(review.title, "Review");
    assert_eq!(review.duration_days, 1);
    assert_eq!(review.owner, None);
    assert_eq!(store.task(1).unwrap().title, "New Task");

    let deps: Vec<_> = store.dependencies_of(4).collect();
    assert_eq!(deps.len(), 2);
    assert!(deps.iter().all(|d| d.condition == Condition::Completed));
    assert!(deps.iter().all(|d| d.logic == Logic::And));
    assert_eq!(deps[0].group, deps[1].group);
    Ok(())
}

#[test]
fn snapshot_schedules_end_to_end() -> TestResult {
    let dir = tempdir()?;
    let path = write_snapshot(dir.path(), LAUNCH)?;
    let snapshot = load_and_validate(&path)?;
    let today = snapshot.settings.today.unwrap();

    let result = generate_global_schedule(&snapshot.store, today)?;
    assert_eq!(result.schedule.len(), 5);

    let find = |id: u64| result.schedule.iter().find(|e| e.id == id).unwrap();

    // u1 finishes project 1 on 01-06; project 2 starts 03-01 anyway.
    assert_eq!(find(2).end_date, date("2024-01-06"));
    assert_eq!(find(4).start_date, date("2024-01-03"));
    assert_eq!(find(5).start_date, date("2024-03-01"));
    assert_eq!(result.end_date, Some(date("2024-03-03")));
    Ok(())
}

#[test]
fn cyclic_snapshot_is_rejected() -> TestResult {
    let dir = tempdir()?;
    let path = write_snapshot(
        dir.path(),
        r#"
[[project]]
id = 1

[[task]]
id = 1
project = 1

[[task]]
id = 2
project = 1

[[dependency]]
task = 1
depends_on = 2

[[dependency]]
task = 2
depends_on = 1
"#,
    )?;

    match load_and_validate(&path) {
        Err(TaskplanError::CyclicDependency { task, cycle }) => {
            assert_eq!(task, 2);
            assert_eq!(cycle, vec![2, 1, 2]);
        }
        other => panic!("Expected CyclicDependency, got: {:?}", other),
    }
    Ok(())
}

#[test]
fn zero_duration_is_rejected() -> TestResult {
    let dir = tempdir()?;
    let path = write_snapshot(
        dir.path(),
        r#"
[[project]]
id = 1

[[task]]
id = 1
project = 1
duration_days = 0
"#,
    )?;

    assert!(matches!(
        load_and_validate(&path),
        Err(TaskplanError::InvalidTask { task: 1, .. })
    ));
    Ok(())
}

#[test]
fn unknown_logic_is_a_parse_error() -> TestResult {
    let dir = tempdir()?;
    let path = write_snapshot(
        dir.path(),
        r#"
[[dependency]]
task = 1
depends_on = 2
logic = "XOR"
"#,
    )?;

    assert!(matches!(load_from_path(&path), Err(TaskplanError::TomlError(_))));
    Ok(())
}

#[test]
fn parent_must_precede_subtask() -> TestResult {
    let dir = tempdir()?;
    let path = write_snapshot(
        dir.path(),
        r#"
[[project]]
id = 1

[[task]]
id = 2
parent = 1

[[task]]
id = 1
project = 1
"#,
    )?;

    match load_and_validate(&path) {
        Err(TaskplanError::ConfigError(msg)) => {
            assert!(msg.contains("declared before its parent"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> TestResult {
    let dir = tempdir()?;
    let result = load_and_validate(dir.path().join("missing.toml"));

    assert!(matches!(result, Err(TaskplanError::IoError(_))));
    Ok(())
}
