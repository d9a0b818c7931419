// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::task::TaskStatus;
use crate::worker::WorkerStatus;

#[test]
fn default_task_builder_is_pending() {
    let task = TaskBuilder::default().build();
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(task.blocked_by_task_ids.is_empty());
}

#[test]
fn blocked_by_sets_status_blocked() {
    let task = TaskBuilder::default().blocked_by(vec![TaskId::new()]).build();
    assert_eq!(task.status, TaskStatus::Blocked);
    assert_eq!(task.blocked_by_task_ids.len(), 1);
}

#[test]
fn default_worker_builder_starts_at_session_generation_one() {
    let worker = WorkerBuilder::default().build();
    assert_eq!(worker.status, WorkerStatus::Starting);
    assert_eq!(worker.session_generation, 1);
    assert!(worker.started_at_ms.is_none());
}

#[test]
fn new_account_sets_requested_capacity() {
    let account = new_account(9);
    assert_eq!(account.max_concurrent_workers, 9);
}
