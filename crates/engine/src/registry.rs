// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner Registry: tracks agent hosts by heartbeat rather than a persistent
//! connection. A runner drops off `ActiveRunners` the moment its heartbeat is
//! more than [`relay_core::LIVENESS_WINDOW_MS`] old; there is no explicit
//! deregistration, stale entries are pruned lazily on read.

use crate::error::EngineResult;
use relay_core::{AccountId, Runner, RunnerId, WorkspaceId, LIVENESS_WINDOW_MS};
use relay_storage::Store;

/// Payload a runner reports on each heartbeat.
pub struct HeartbeatReport {
    pub runner_id: RunnerId,
    pub account_id: AccountId,
    pub url: String,
    pub workspace_ids: Vec<WorkspaceId>,
    pub active_workers: u32,
    pub capacity: u32,
    pub version: String,
}

/// Upsert a runner's heartbeat. The reference store has no separate
/// "register" call: the first heartbeat for an unknown `runner_id` creates
/// the record.
pub async fn heartbeat(store: &dyn Store, report: HeartbeatReport, now_ms: u64) -> EngineResult<Runner> {
    let runner = Runner {
        id: report.runner_id.clone(),
        account_id: report.account_id,
        url: report.url,
        workspace_ids: report.workspace_ids,
        capacity: report.capacity,
        active_workers: report.active_workers,
        last_heartbeat_at_ms: now_ms,
        version: report.version,
    };
    let runner = store.upsert_runner(runner).await?;
    tracing::debug!(runner_id = %runner.id, active_workers = runner.active_workers, "runner heartbeat");
    Ok(runner)
}

/// Runners with a heartbeat inside [`LIVENESS_WINDOW_MS`].
pub async fn active_runners(
    store: &dyn Store,
    workspace_id: &WorkspaceId,
    now_ms: u64,
) -> EngineResult<Vec<Runner>> {
    Ok(store.list_active_runners(workspace_id, now_ms).await?)
}

/// Total free capacity a workspace's active runners currently advertise:
/// `sum(capacity) - sum(active_workers)` across every runner whose
/// `workspace_ids` names it.
pub async fn capacity_for(
    store: &dyn Store,
    workspace_id: &WorkspaceId,
    now_ms: u64,
) -> EngineResult<u32> {
    let runners = active_runners(store, workspace_id, now_ms).await?;
    Ok(runners.iter().map(Runner::free_capacity).sum())
}

pub fn is_active(runner: &Runner, now_ms: u64) -> bool {
    runner.is_active(now_ms)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
