// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reassign & Stale Recovery.
//!
//! A worker with no reported activity for 5 minutes (15 if it has ever
//! entered plan mode — plan review can legitimately sit idle far longer) is
//! stale and never self-recovers; either the periodic sweep here or an
//! explicit `ReassignTask` call clears it. `waiting_input` workers are never
//! stale: a worker pausing on a human is not the same as a worker that died.

use crate::dispatch::{publish_best_effort, Bus};
use crate::error::{EngineError, EngineResult};
use relay_core::{
    Channel, ClearableField, Event, KernelError, Task, TaskId, TaskStatus, Worker, WorkerPatch,
    WorkerStatus,
};
use relay_storage::Store;

const STALE_THRESHOLD_MS: u64 = 5 * 60 * 1_000;
const STALE_THRESHOLD_PLANNING_MS: u64 = 15 * 60 * 1_000;

fn stale_threshold_ms(worker: &Worker) -> u64 {
    if worker.plan_start_message_index.is_some() {
        STALE_THRESHOLD_PLANNING_MS
    } else {
        STALE_THRESHOLD_MS
    }
}

fn is_stale(worker: &Worker, now_ms: u64) -> bool {
    if worker.is_waiting() || worker.status.is_terminal() {
        return false;
    }
    now_ms.saturating_sub(worker.updated_at_ms) > stale_threshold_ms(worker)
}

async fn fail_worker_as_reassigned(
    store: &dyn Store,
    bus: &dyn Bus,
    worker: Worker,
    reason: &str,
    now_ms: u64,
) -> EngineResult<()> {
    let patch = WorkerPatch {
        status: Some(WorkerStatus::Failed),
        error: ClearableField::Set(reason.to_string()),
        ..Default::default()
    };
    let worker = store.patch_worker(&worker.id, patch, now_ms).await?;
    let channel = Channel::Workspace(worker.workspace_id.clone());
    publish_best_effort(bus, channel, Event::WorkerFailed { worker }).await;
    Ok(())
}

/// Outcome of an explicit `ReassignTask` call.
#[derive(Debug, Clone, PartialEq)]
pub enum ReassignOutcome {
    Reassigned { task: Box<Task> },
    NotReassigned { reason: String, can_takeover: bool },
}

pub struct ReassignRequest {
    pub task_id: TaskId,
    pub force: bool,
    pub is_workspace_owner: bool,
}

/// Drive the 5-branch `ReassignTask` decision tree.
pub async fn reassign_task(
    store: &dyn Store,
    bus: &dyn Bus,
    req: ReassignRequest,
    now_ms: u64,
) -> EngineResult<ReassignOutcome> {
    let task = store.get_task(&req.task_id).await?;

    match task.status {
        TaskStatus::Pending => {
            let channel = Channel::Workspace(task.workspace_id.clone());
            publish_best_effort(
                bus,
                channel,
                Event::TaskAssigned { task: task.clone(), target_local_ui_url: None },
            )
            .await;
            Ok(ReassignOutcome::Reassigned { task: Box::new(task) })
        }
        TaskStatus::Assigned | TaskStatus::Running => {
            let can_takeover = req.is_workspace_owner || task.is_lease_expired(now_ms);

            if !req.force {
                return Ok(ReassignOutcome::NotReassigned {
                    reason: "task is already claimed".into(),
                    can_takeover,
                });
            }
            if !can_takeover {
                return Err(EngineError::Kernel(KernelError::forbidden(
                    "not stale and not the workspace owner",
                )));
            }

            let workers = store.list_workers(&task.workspace_id).await?;
            for worker in workers.into_iter().filter(|w| w.task_id == task.id && w.status.is_active()) {
                fail_worker_as_reassigned(store, bus, worker, "Task was reassigned", now_ms).await?;
            }

            let released = store.release_task(&task.id, now_ms).await?;
            let channel = Channel::Workspace(released.workspace_id.clone());
            publish_best_effort(
                bus,
                channel,
                Event::TaskAssigned { task: released.clone(), target_local_ui_url: None },
            )
            .await;
            Ok(ReassignOutcome::Reassigned { task: Box::new(released) })
        }
        TaskStatus::Blocked => {
            Ok(ReassignOutcome::NotReassigned { reason: "task is blocked".into(), can_takeover: false })
        }
        TaskStatus::Completed | TaskStatus::Failed => Ok(ReassignOutcome::NotReassigned {
            reason: format!("already {}", task.status),
            can_takeover: false,
        }),
    }
}

/// Periodic stale-worker sweep: fail each truly-stale worker and release its
/// task back to `pending`. Returns the workers that were marked stale.
pub async fn sweep_stale_workers(store: &dyn Store, bus: &dyn Bus, now_ms: u64) -> EngineResult<Vec<Worker>> {
    let candidates = store.list_stale_workers(now_ms, STALE_THRESHOLD_MS).await?;
    let mut recovered = Vec::new();

    for worker in candidates {
        if !is_stale(&worker, now_ms) {
            continue;
        }
        let patch = WorkerPatch {
            status: Some(WorkerStatus::Stale),
            error: ClearableField::Set("stale: no activity within threshold".into()),
            ..Default::default()
        };
        let worker = store.patch_worker(&worker.id, patch, now_ms).await?;
        let channel = Channel::Workspace(worker.workspace_id.clone());
        publish_best_effort(bus, channel, Event::WorkerFailed { worker: worker.clone() }).await;

        if let Ok(task) = store.get_task(&worker.task_id).await {
            if task.status.is_claimed() {
                let released = store.release_task(&task.id, now_ms).await?;
                let channel = Channel::Workspace(released.workspace_id.clone());
                publish_best_effort(
                    bus,
                    channel,
                    Event::TaskAssigned { task: released, target_local_ui_url: None },
                )
                .await;
            }
        }
        recovered.push(worker);
    }

    tracing::info!(count = recovered.len(), "stale worker sweep complete");
    Ok(recovered)
}

#[cfg(test)]
#[path = "reassign_tests.rs"]
mod tests;
