// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::account::AccountId;
use crate::task::TaskId;
use crate::workspace::WorkspaceId;

fn new_worker() -> Worker {
    Worker::new(AccountId::new(), TaskId::new(), WorkspaceId::new(), 1_000)
}

#[test]
fn starts_in_starting_status() {
    let w = new_worker();
    assert_eq!(w.status, WorkerStatus::Starting);
    assert_eq!(w.session_generation, 1);
}

#[test]
fn promote_running_sets_started_at_once() {
    let mut w = new_worker();
    w.promote_running(2_000);
    assert_eq!(w.status, WorkerStatus::Running);
    assert_eq!(w.started_at_ms, Some(2_000));

    w.status = WorkerStatus::Running;
    w.promote_running(3_000);
    assert_eq!(w.started_at_ms, Some(2_000), "does not move once set");
}

#[test]
fn waiting_input_never_goes_stale_and_resumes_clears_waiting_for() {
    let mut w = new_worker();
    w.promote_running(1_000);
    w.enter_waiting(
        WaitingFor {
            kind: WaitingKind::PlanApproval,
            prompt: "review?".into(),
            tool_use_id: "tu1".into(),
            options: vec!["bypass".into(), "review".into(), "changes".into()],
        },
        2_000,
    );
    assert!(w.is_waiting());
    assert_eq!(w.waiting_for.as_ref().unwrap().options.len(), 3);

    w.resume_running(3_000);
    assert_eq!(w.status, WorkerStatus::Running);
    assert!(w.waiting_for.is_none());
}

#[test]
fn milestones_are_capped_at_fifty_on_append() {
    let mut w = new_worker();
    let batch: Vec<Milestone> = (0..60)
        .map(|i| Milestone { kind: "phase".into(), label: format!("step {i}"), ts_ms: i, progress: None, tool_count: None })
        .collect();
    w.append_milestones(batch, 1_000);
    assert_eq!(w.milestones.len(), MILESTONE_CAP);
    assert_eq!(w.milestones.first().unwrap().label, "step 10");
    assert_eq!(w.milestones.last().unwrap().label, "step 59");
}

#[test]
fn reactivate_increments_session_generation_and_clears_error() {
    let mut w = new_worker();
    w.fail("boom", 2_000);
    assert_eq!(w.status, WorkerStatus::Failed);

    let gen = w.reactivate(3_000);
    assert_eq!(gen, 2);
    assert_eq!(w.status, WorkerStatus::Running);
    assert!(w.error.is_none());
    assert!(w.completed_at_ms.is_none());
}

#[test]
fn patch_clearable_fields_distinguish_absent_from_null() {
    let patch: WorkerPatch = serde_json::from_str(r#"{"error": null}"#).unwrap();
    assert_eq!(patch.error, ClearableField::Clear);

    let patch: WorkerPatch = serde_json::from_str("{}").unwrap();
    assert_eq!(patch.error, ClearableField::Absent);

    let patch: WorkerPatch = serde_json::from_str(r#"{"error": "oops"}"#).unwrap();
    assert_eq!(patch.error, ClearableField::Set("oops".to_string()));
}

#[test]
fn is_active_covers_capacity_counted_statuses() {
    assert!(WorkerStatus::Starting.is_active());
    assert!(WorkerStatus::Running.is_active());
    assert!(WorkerStatus::WaitingInput.is_active());
    assert!(WorkerStatus::Idle.is_active());
    assert!(!WorkerStatus::Completed.is_active());
    assert!(!WorkerStatus::Failed.is_active());
    assert!(!WorkerStatus::Stale.is_active());
}
