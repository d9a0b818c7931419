// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::Store;
use relay_core::test_support::{new_account, TaskBuilder};

#[tokio::test]
async fn claim_then_complete_unblocks_dependent_through_the_trait() {
    let store = MemoryStore::new();
    let account = new_account(5);
    let account_id = account.id.clone();
    store.seed_account(account);
    let workspace_id = WorkspaceId::new();

    let blocker = TaskBuilder::default().workspace_id(workspace_id.clone()).build();
    let blocker_id = blocker.id.clone();
    let dependent =
        TaskBuilder::default().workspace_id(workspace_id.clone()).blocked_by(vec![blocker_id.clone()]).build();
    let dependent_id = dependent.id.clone();
    store.insert_task(blocker).await.unwrap();
    store.insert_task(dependent).await.unwrap();

    let worker_id = WorkerId::new();
    let outcome = store
        .claim_next_task(&workspace_id, &account_id, &worker_id, 60_000, 1_000)
        .await
        .unwrap();
    let claimed = match outcome {
        crate::store::ClaimOutcome::Claimed(t) => *t,
        other => panic!("expected claim, got {other:?}"),
    };
    assert_eq!(claimed.id, blocker_id);

    let released = store.release_task(&claimed.id, 2_000).await.unwrap();
    assert_eq!(released.status, relay_core::TaskStatus::Pending);

    let unblocked = store.unblock_dependents(&blocker_id, 3_000).await.unwrap();
    assert_eq!(unblocked.len(), 1);
    assert_eq!(store.get_task(&dependent_id).await.unwrap().status, relay_core::TaskStatus::Pending);
}
