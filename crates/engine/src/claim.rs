// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Claim Engine: admits a worker against `account.max_concurrent_workers`
//! and hands it one task, either a specific one or the highest-priority
//! pending task in the workspace.

use crate::dispatch::{publish_best_effort, Bus};
use crate::error::EngineResult;
use relay_core::{
    Account, AccountId, Channel, Event, Task, TaskId, Worker, WorkerId, WorkspaceId,
};
use relay_storage::{ClaimOutcome, Store};

/// What the caller asked the Claim Engine to do.
pub enum ClaimRequest {
    /// Pick the highest-priority pending task in the workspace.
    Next,
    /// Claim this specific task, bypassing priority selection.
    Specific(TaskId),
}

/// Result surfaced to the HTTP boundary: either a claimed task with the
/// worker record created for it, or a reason no claim happened.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimResult {
    Claimed { task: Box<Task>, worker: Box<Worker> },
    NoTaskAvailable,
    CapacityExceeded { current: u32, limit: u32 },
}

/// Claim a task and start a worker for it in one step. On success, emits
/// `TaskClaimed` then `WorkerStarted` on the workspace channel.
pub async fn claim(
    store: &dyn Store,
    bus: &dyn Bus,
    workspace_id: &WorkspaceId,
    account_id: &AccountId,
    lease_ms: u64,
    now_ms: u64,
    request: ClaimRequest,
) -> EngineResult<ClaimResult> {
    let account: Account = store.get_account(account_id).await?;
    let worker_id = WorkerId::new();

    let outcome = match request {
        ClaimRequest::Next => {
            store.claim_next_task(workspace_id, account_id, &worker_id, lease_ms, now_ms).await?
        }
        ClaimRequest::Specific(task_id) => {
            store.claim_specific_task(&task_id, account_id, &worker_id, lease_ms, now_ms).await?
        }
    };

    let task = match outcome {
        ClaimOutcome::Claimed(task) => *task,
        ClaimOutcome::NoTaskAvailable => return Ok(ClaimResult::NoTaskAvailable),
        ClaimOutcome::CapacityExceeded { current, limit } => {
            return Ok(ClaimResult::CapacityExceeded { current, limit })
        }
    };

    let worker = Worker::new(account.id.clone(), task.id.clone(), workspace_id.clone(), now_ms);
    let worker = store.insert_worker(worker).await?;

    tracing::info!(
        task_id = %task.id,
        worker_id = %worker.id,
        account_id = %account.id,
        "task claimed"
    );

    let channel = Channel::Workspace(workspace_id.clone());
    publish_best_effort(bus, channel.clone(), Event::TaskClaimed { task: task.clone() }).await;
    publish_best_effort(bus, channel, Event::WorkerStarted { worker: worker.clone() }).await;

    Ok(ClaimResult::Claimed { task: Box::new(task), worker: Box::new(worker) })
}

#[cfg(test)]
#[path = "claim_tests.rs"]
mod tests;
