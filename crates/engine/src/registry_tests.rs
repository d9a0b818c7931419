// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_core::test_support::new_account;
use relay_storage::MemoryStore;

fn report(runner_id: RunnerId, account_id: AccountId, workspace_id: WorkspaceId) -> HeartbeatReport {
    HeartbeatReport {
        runner_id,
        account_id,
        url: "https://runner.example/".into(),
        workspace_ids: vec![workspace_id],
        active_workers: 1,
        capacity: 4,
        version: "1.0.0".into(),
    }
}

#[tokio::test]
async fn heartbeat_creates_then_updates_a_runner() {
    let store = MemoryStore::new();
    let account = new_account(5);
    let account_id = account.id.clone();
    store.seed_account(account);
    let workspace_id = WorkspaceId::new();
    let runner_id = RunnerId::new();

    let first = heartbeat(&store, report(runner_id.clone(), account_id.clone(), workspace_id.clone()), 1_000)
        .await
        .unwrap();
    assert_eq!(first.last_heartbeat_at_ms, 1_000);

    let mut second_report = report(runner_id.clone(), account_id, workspace_id.clone());
    second_report.active_workers = 2;
    let second = heartbeat(&store, second_report, 2_000).await.unwrap();
    assert_eq!(second.id, runner_id);
    assert_eq!(second.active_workers, 2);
    assert_eq!(second.last_heartbeat_at_ms, 2_000);
}

#[tokio::test]
async fn capacity_for_sums_free_capacity_of_active_runners_only() {
    let store = MemoryStore::new();
    let account = new_account(5);
    let account_id = account.id.clone();
    store.seed_account(account);
    let workspace_id = WorkspaceId::new();

    heartbeat(&store, report(RunnerId::new(), account_id.clone(), workspace_id.clone()), 1_000)
        .await
        .unwrap();
    heartbeat(&store, report(RunnerId::new(), account_id, workspace_id.clone()), 1_000).await.unwrap();

    let now_within_window = 1_000 + LIVENESS_WINDOW_MS - 1;
    assert_eq!(capacity_for(&store, &workspace_id, now_within_window).await.unwrap(), 6);

    let now_past_window = 1_000 + LIVENESS_WINDOW_MS + 1;
    assert_eq!(capacity_for(&store, &workspace_id, now_past_window).await.unwrap(), 0);
}
