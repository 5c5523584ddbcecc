//! Extraction Property Tests
//!
//! Exhaustive checks of strict and graceful extraction over every subset
//! of completed roles and over record orderings.

use std::time::Duration;

use projectforge::core::StepStatus;
use projectforge::{extract_safe, extract_strict, ExtractError, Role, RoleOutput, StepRecord};

fn completed(role: Role, text: &str) -> StepRecord {
    StepRecord::completed(role.index(), role.display_name(), text, Duration::from_millis(5))
}

/// Roles selected by the low five bits of `mask`, in canonical order.
fn subset(mask: u8) -> Vec<Role> {
    Role::ALL.into_iter().filter(|role| mask & (1 << role.index()) != 0).collect()
}

/// Records for a run where only `done` completed and everything else failed
/// or was never started.
fn run_with(done: &[Role]) -> Vec<StepRecord> {
    Role::ALL
        .into_iter()
        .map(|role| {
            if done.contains(&role) {
                completed(role, &format!("{} text", role.key()))
            } else if role.index() % 2 == 0 {
                StepRecord::failed(role.index(), role.display_name(), "timeout", Duration::ZERO)
            } else {
                StepRecord::not_run(role.index(), role.display_name())
            }
        })
        .collect()
}

// ============================================================================
// Subset Properties
// ============================================================================

#[test]
fn test_safe_returns_exactly_completed_roles() {
    for mask in 1..32u8 {
        let done = subset(mask);
        let outputs = extract_safe(&run_with(&done)).unwrap();

        for role in Role::ALL {
            let expected = if done.contains(&role) {
                RoleOutput::Text(format!("{} text", role.key()))
            } else {
                RoleOutput::Absent
            };
            assert_eq!(outputs[role], expected, "mask {mask:05b}, role {role}");
        }
    }
}

#[test]
fn test_strict_missing_is_sorted_complement() {
    for mask in 0..31u8 {
        let done = subset(mask);
        let expected: Vec<Role> = Role::ALL.into_iter().filter(|r| !done.contains(r)).collect();

        match extract_strict(&run_with(&done)) {
            Err(ExtractError::MissingRoles { missing }) => assert_eq!(missing, expected),
            other => panic!("mask {mask:05b}: expected MissingRoles, got {other:?}"),
        }
    }
}

#[test]
fn test_strict_succeeds_for_any_order_with_duplicates() {
    let mut records: Vec<StepRecord> =
        Role::ALL.into_iter().rev().map(|r| completed(r, "first")).collect();
    records.extend(Role::ALL.into_iter().map(|r| completed(r, "second")));
    records.swap(1, 7);

    let outputs = extract_strict(&records).unwrap();
    for (role, text) in outputs.iter() {
        let last = records
            .iter()
            .rev()
            .find(|r| r.agent_role() == role.display_name())
            .and_then(StepRecord::text)
            .unwrap();
        assert_eq!(text, last);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_partial_run_scenario() {
    let records = vec![completed(Role::Intake, "F1"), completed(Role::Architect, "F2")];
    let outputs = extract_safe(&records).unwrap();

    assert_eq!(outputs[Role::Intake], RoleOutput::Text("F1".to_string()));
    assert_eq!(outputs[Role::Architect], RoleOutput::Text("F2".to_string()));
    assert!(outputs[Role::Quality].is_absent());
    assert!(outputs[Role::Synthesis].is_absent());
    assert!(outputs[Role::Manager].is_absent());
}

#[test]
fn test_draft_then_final() {
    let records = vec![completed(Role::Intake, "draft"), completed(Role::Intake, "final")];
    let outputs = extract_safe(&records).unwrap();
    assert_eq!(outputs[Role::Intake].as_text(), Some("final"));
}

#[test]
fn test_unknown_agent_is_never_absent() {
    let mut records = run_with(&Role::ALL);
    records.push(StepRecord::completed(5, "Unknown Agent", "??", Duration::ZERO));

    let strict = extract_strict(&records).unwrap_err();
    assert!(matches!(strict, ExtractError::UnknownRole(ref e) if e.name == "Unknown Agent"));

    let safe = extract_safe(&records).unwrap_err();
    assert_eq!(safe.name, "Unknown Agent");
}

#[test]
fn test_unknown_agent_on_failed_record_still_fatal() {
    let mut records = run_with(&[Role::Intake]);
    records.push(StepRecord::failed(1, "technical architect", "boom", Duration::ZERO));

    assert!(extract_safe(&records).is_err());
}

#[test]
fn test_records_keep_status() {
    let records = run_with(&[Role::Architect]);
    let statuses: Vec<_> = records.iter().map(StepRecord::status).collect();
    assert_eq!(
        statuses,
        [
            StepStatus::Failed,
            StepStatus::Completed,
            StepStatus::Failed,
            StepStatus::NotRun,
            StepStatus::Failed
        ]
    );
}
