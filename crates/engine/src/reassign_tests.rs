// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::dispatch::InMemoryBus;
use relay_core::test_support::{TaskBuilder, WorkerBuilder};
use relay_core::WorkerId;
use relay_storage::MemoryStore;

#[tokio::test]
async fn reassigning_a_pending_task_just_re_emits_assigned() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let task = TaskBuilder::default().build();
    let task_id = task.id.clone();
    store.insert_task(task).await.unwrap();

    let outcome = reassign_task(
        &store,
        &bus,
        ReassignRequest { task_id, force: false, is_workspace_owner: false },
        1_000,
    )
    .await
    .unwrap();
    assert!(matches!(outcome, ReassignOutcome::Reassigned { .. }));
    assert_eq!(bus.drain().len(), 1);
}

#[tokio::test]
async fn claimed_task_without_force_reports_takeover_eligibility() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let mut task = TaskBuilder::default().build();
    let worker_id = WorkerId::new();
    task.assign(worker_id.clone(), 0, 60_000);
    let task_id = task.id.clone();
    store.insert_task(task).await.unwrap();
    let mut worker = WorkerBuilder::default().task_id(task_id.clone()).build();
    worker.id = worker_id;
    worker.updated_at_ms = 0;
    store.insert_worker(worker).await.unwrap();

    let outcome = reassign_task(
        &store,
        &bus,
        ReassignRequest { task_id, force: false, is_workspace_owner: true },
        1_000,
    )
    .await
    .unwrap();
    match outcome {
        ReassignOutcome::NotReassigned { can_takeover, .. } => assert!(can_takeover),
        other => panic!("expected NotReassigned, got {other:?}"),
    }
}

#[tokio::test]
async fn forced_reassign_fails_active_workers_and_releases_the_task() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let mut task = TaskBuilder::default().build();
    let worker_id = WorkerId::new();
    task.assign(worker_id.clone(), 0, 60_000);
    let task_id = task.id.clone();
    store.insert_task(task).await.unwrap();
    let mut worker = WorkerBuilder::default().task_id(task_id.clone()).status(WorkerStatus::Running).build();
    worker.id = worker_id;
    store.insert_worker(worker).await.unwrap();

    let outcome = reassign_task(
        &store,
        &bus,
        ReassignRequest { task_id: task_id.clone(), force: true, is_workspace_owner: true },
        1_000,
    )
    .await
    .unwrap();
    match outcome {
        ReassignOutcome::Reassigned { task } => assert_eq!(task.status, TaskStatus::Pending),
        other => panic!("expected Reassigned, got {other:?}"),
    }
    assert_eq!(bus.drain().len(), 2);
}

#[tokio::test]
async fn forced_reassign_without_eligibility_is_forbidden() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let mut task = TaskBuilder::default().build();
    let worker_id = WorkerId::new();
    task.assign(worker_id.clone(), 0, 60_000);
    let task_id = task.id.clone();
    store.insert_task(task).await.unwrap();
    let mut worker = WorkerBuilder::default().task_id(task_id.clone()).build();
    worker.id = worker_id;
    worker.updated_at_ms = 900;
    store.insert_worker(worker).await.unwrap();

    let err = reassign_task(
        &store,
        &bus,
        ReassignRequest { task_id, force: true, is_workspace_owner: false },
        1_000,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, EngineError::Kernel(KernelError::Forbidden { .. })));
}

#[tokio::test]
async fn completed_task_reports_already_completed() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let mut task = TaskBuilder::default().build();
    task.complete(relay_core::TaskResult::default(), 500);
    let task_id = task.id.clone();
    store.insert_task(task).await.unwrap();

    let outcome = reassign_task(
        &store,
        &bus,
        ReassignRequest { task_id, force: false, is_workspace_owner: true },
        1_000,
    )
    .await
    .unwrap();
    match outcome {
        ReassignOutcome::NotReassigned { reason, can_takeover } => {
            assert_eq!(reason, "already completed");
            assert!(!can_takeover);
        }
        other => panic!("expected NotReassigned, got {other:?}"),
    }
}

#[tokio::test]
async fn sweep_marks_long_idle_workers_stale_and_releases_their_task() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let mut task = TaskBuilder::default().build();
    let worker_id = WorkerId::new();
    task.assign(worker_id.clone(), 0, 10_000_000);
    let task_id = task.id.clone();
    store.insert_task(task).await.unwrap();
    let mut worker =
        WorkerBuilder::default().task_id(task_id.clone()).status(WorkerStatus::Running).build();
    worker.id = worker_id;
    worker.updated_at_ms = 0;
    store.insert_worker(worker).await.unwrap();

    let recovered = sweep_stale_workers(&store, &bus, 10 * 60 * 1_000).await.unwrap();
    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0].status, WorkerStatus::Stale);
    assert_eq!(store.get_task(&task_id).await.unwrap().status, TaskStatus::Pending);
}

#[tokio::test]
async fn sweep_leaves_planning_workers_alone_under_the_longer_threshold() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let mut worker = WorkerBuilder::default().status(WorkerStatus::Running).build();
    worker.updated_at_ms = 0;
    worker.plan_start_message_index = Some(3);
    store.insert_worker(worker).await.unwrap();

    let recovered = sweep_stale_workers(&store, &bus, 10 * 60 * 1_000).await.unwrap();
    assert!(recovered.is_empty());
}
