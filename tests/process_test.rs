/*!
 * Process Registry Tests
 * Tests for creation, identity assignment, lookup, and snapshots
 */

use pretty_assertions::assert_eq;
use procsim::{EventLog, Originator, ProcessRegistry, ProcessState, ScriptTimings};

fn registry() -> (ProcessRegistry, procsim::CaptureSink) {
    let (events, capture) = EventLog::capturing();
    (
        ProcessRegistry::with_timings(events, ScriptTimings::compressed()),
        capture,
    )
}

#[test]
fn test_process_creation() {
    let (registry, _capture) = registry();
    let pid = registry.create_by_user();

    assert_eq!(pid, 1);

    let process = registry.get(pid).unwrap();
    assert_eq!(process.pid(), 1);
    assert_eq!(process.origin(), Originator::User);

    registry.wait_for_all();
}

#[test]
fn test_multiple_process_creation() {
    let (registry, _capture) = registry();

    let pid1 = registry.create_by_user();
    let pid2 = registry.create_by_kernel();
    let pid3 = registry.create_by_process(pid1);

    assert_eq!(pid1, 1);
    assert_eq!(pid2, 2);
    assert_eq!(pid3, 3);
    assert_eq!(registry.len(), 3);

    registry.wait_for_all();
}

#[test]
fn test_creation_notices() {
    let (registry, capture) = registry();

    registry.create_by_user();
    registry.create_by_kernel();
    registry.create_by_process(1);
    registry.create(Originator::Unknown);
    registry.wait_for_all();

    let lines = capture.lines();
    let notices: Vec<&String> = lines
        .iter()
        .filter(|line| line.contains("created by") || line.as_str() == "Unknown creation!")
        .collect();
    assert_eq!(
        notices,
        vec![
            "Process 1 created by User.",
            "Process 2 created by Kernal.",
            "Process 3 created by Process 1.",
            "Unknown creation!",
        ]
    );
}

#[test]
fn test_registry_keeps_terminated_processes() {
    let (registry, _capture) = registry();

    registry.create_by_user();
    registry.create_by_kernel();
    registry.wait_for_all();

    // Full-history table: nothing is removed on termination.
    assert_eq!(registry.len(), 2);
    for snapshot in registry.status_snapshot() {
        assert_eq!(snapshot.state, ProcessState::Terminated);
    }
}

#[test]
fn test_status_snapshot_preserves_origin_and_order() {
    let (registry, _capture) = registry();

    registry.create_by_kernel();
    registry.create_by_process(1);
    registry.wait_for_all();

    let snapshots = registry.status_snapshot();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].pid, 1);
    assert_eq!(snapshots[0].origin, Originator::Kernel);
    assert_eq!(snapshots[1].pid, 2);
    assert_eq!(snapshots[1].origin, Originator::Process(1));
}

#[test]
fn test_status_snapshot_serializes_to_json() {
    let (registry, _capture) = registry();

    registry.create_by_user();
    registry.wait_for_all();

    let json = serde_json::to_value(registry.status_snapshot()).unwrap();
    assert_eq!(json[0]["pid"], 1);
    assert_eq!(json[0]["state"], "terminated");
    assert_eq!(json[0]["cpu_usage"], 50);
}

#[test]
fn test_empty_registry() {
    let (registry, capture) = registry();

    assert!(registry.is_empty());
    assert!(registry.get(1).is_none());

    registry.wait_for_all();
    registry.show_status();
    assert!(capture.lines().is_empty());
}
