// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::dispatch::InMemoryBus;
use relay_core::test_support::{new_account, TaskBuilder};
use relay_storage::MemoryStore;

#[tokio::test]
async fn claims_next_and_starts_a_worker() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let account = new_account(3);
    let account_id = account.id.clone();
    store.seed_account(account);
    let workspace_id = WorkspaceId::new();
    let task = TaskBuilder::default().workspace_id(workspace_id.clone()).build();
    let task_id = task.id.clone();
    store.insert_task(task).await.unwrap();

    let result =
        claim(&store, &bus, &workspace_id, &account_id, 60_000, 1_000, ClaimRequest::Next).await.unwrap();
    match result {
        ClaimResult::Claimed { task, worker } => {
            assert_eq!(task.id, task_id);
            assert_eq!(worker.task_id, task_id);
        }
        other => panic!("expected a claim, got {other:?}"),
    }
    assert_eq!(bus.drain().len(), 2);
}

#[tokio::test]
async fn claims_specific_task_by_id() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let account = new_account(3);
    let account_id = account.id.clone();
    store.seed_account(account);
    let workspace_id = WorkspaceId::new();
    let low = TaskBuilder::default().workspace_id(workspace_id.clone()).priority(1).build();
    let low_id = low.id.clone();
    let high = TaskBuilder::default().workspace_id(workspace_id.clone()).priority(9).build();
    store.insert_task(low).await.unwrap();
    store.insert_task(high).await.unwrap();

    let result = claim(
        &store,
        &bus,
        &workspace_id,
        &account_id,
        60_000,
        1_000,
        ClaimRequest::Specific(low_id.clone()),
    )
    .await
    .unwrap();
    match result {
        ClaimResult::Claimed { task, .. } => assert_eq!(task.id, low_id),
        other => panic!("expected a claim, got {other:?}"),
    }
}

#[tokio::test]
async fn reports_capacity_exceeded_without_touching_the_bus() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let account = new_account(0);
    let account_id = account.id.clone();
    store.seed_account(account);
    let workspace_id = WorkspaceId::new();

    let result =
        claim(&store, &bus, &workspace_id, &account_id, 60_000, 1_000, ClaimRequest::Next).await.unwrap();
    assert_eq!(result, ClaimResult::CapacityExceeded { current: 0, limit: 0 });
    assert!(bus.drain().is_empty());
}
