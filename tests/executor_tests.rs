//! Integration tests for plan execution.
//!
//! Tests cover:
//! - Successful moves and directory creation
//! - Per-entry failure isolation
//! - Cancellation between entries
//! - Plans with duplicate destinations

use show_organizer::core::events::{CollectingObserver, NullObserver, OrganizeEvent};
use show_organizer::core::executor::{FileMover, MoverConfig};
use show_organizer::models::media::ResolutionMethod;
use show_organizer::models::plan::{OperationStats, Plan, PlanEntry};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tempfile::TempDir;

fn entry(source: PathBuf, destination: PathBuf, episode: u16) -> PlanEntry {
    PlanEntry {
        source_path: source,
        destination_path: destination,
        show_name: "Dark".to_string(),
        season_number: 1,
        episode_number: episode,
        last_episode: None,
        method: ResolutionMethod::ExplicitPattern,
    }
}

fn destination(root: &Path, episode: u16) -> PathBuf {
    root.join("Dark")
        .join("Season 01")
        .join(format!("Dark - S01E{:02} - Episode {:02}.mkv", episode, episode))
}

fn plan_of(entries: Vec<PlanEntry>) -> Plan {
    Plan {
        version: "1.0".to_string(),
        entries,
        ..Default::default()
    }
}

#[test]
fn test_execute_moves_files() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("in").join("Dark.S01E01.mkv");
    fs::create_dir_all(source.parent().unwrap()).unwrap();
    fs::write(&source, "episode one").unwrap();
    let target = destination(&temp_dir.path().join("out"), 1);

    let mut stats = OperationStats::default();
    let mut observer = CollectingObserver::default();
    let report = FileMover::new()
        .execute(
            &plan_of(vec![entry(source.clone(), target.clone(), 1)]),
            &mut stats,
            &mut observer,
        )
        .unwrap();

    assert_eq!(report.moved.len(), 1);
    assert!(report.failed.is_empty());
    assert!(!source.exists());
    assert_eq!(fs::read_to_string(&target).unwrap(), "episode one");
    assert_eq!(stats.moved, 1);
    assert_eq!(
        observer.events,
        vec![OrganizeEvent::FileMoved {
            from: source,
            to: target
        }]
    );
}

#[test]
fn test_existing_destination_fails_and_rest_continue() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let first = temp_dir.path().join("a.mkv");
    let second = temp_dir.path().join("b.mkv");
    fs::write(&first, "a").unwrap();
    fs::write(&second, "b").unwrap();

    // Left over from an unrelated earlier run
    let taken = destination(&out, 1);
    fs::create_dir_all(taken.parent().unwrap()).unwrap();
    fs::write(&taken, "old").unwrap();

    let plan = plan_of(vec![
        entry(first.clone(), taken.clone(), 1),
        entry(second.clone(), destination(&out, 2), 2),
    ]);
    let mut stats = OperationStats::default();
    let report = FileMover::new()
        .execute(&plan, &mut stats, &mut NullObserver)
        .unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, first);
    assert_eq!(report.moved.len(), 1);
    assert!(first.exists());
    assert_eq!(fs::read_to_string(&taken).unwrap(), "old");
    assert!(!second.exists());
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.moved, 1);
}

#[test]
fn test_missing_source_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("gone.mkv");
    let target = destination(temp_dir.path(), 1);

    let mut observer = CollectingObserver::default();
    let report = FileMover::new()
        .execute(
            &plan_of(vec![entry(missing.clone(), target.clone(), 1)]),
            &mut OperationStats::default(),
            &mut observer,
        )
        .unwrap();

    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].reason.contains("not found"));
    assert!(!target.exists());
    assert!(matches!(
        observer.events.as_slice(),
        [OrganizeEvent::MoveFailed { path, .. }] if path == &missing
    ));
}

#[test]
fn test_cancel_flag_stops_before_next_entry() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("a.mkv");
    fs::write(&source, "a").unwrap();

    let cancel = Arc::new(AtomicBool::new(true));
    let mut observer = CollectingObserver::default();
    let report = FileMover::new()
        .with_cancel_flag(cancel)
        .execute(
            &plan_of(vec![entry(source.clone(), destination(temp_dir.path(), 1), 1)]),
            &mut OperationStats::default(),
            &mut observer,
        )
        .unwrap();

    assert!(report.cancelled);
    assert!(report.moved.is_empty());
    assert!(source.exists());
    assert_eq!(observer.events, vec![OrganizeEvent::Cancelled { remaining: 1 }]);
}

#[test]
fn test_duplicate_destinations_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("a.mkv");
    let second = temp_dir.path().join("b.mkv");
    fs::write(&first, "a").unwrap();
    fs::write(&second, "b").unwrap();
    let target = destination(temp_dir.path(), 1);

    let plan = plan_of(vec![
        entry(first.clone(), target.clone(), 1),
        entry(second.clone(), target, 1),
    ]);
    let result = FileMover::with_config(MoverConfig {
        verify_checksum: false,
    })
    .execute(&plan, &mut OperationStats::default(), &mut NullObserver);

    assert!(matches!(
        result,
        Err(show_organizer::Error::PlanValidationError(_))
    ));
    assert!(first.exists());
    assert!(second.exists());
}
