// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task CRUD and the predicated claim/unblock/stale-claim queries.

use super::state::State;
use crate::error::{StorageError, StorageResult};
use crate::store::ClaimOutcome;
use relay_core::{
    AccountId, KernelError, Task, TaskId, TaskPatch, TaskResult, TaskStatus, WorkerId, WorkspaceId,
};

pub(crate) fn insert(state: &mut State, task: Task) -> StorageResult<Task> {
    state.tasks.insert(task.id.clone(), task.clone());
    Ok(task)
}

pub(crate) fn get(state: &State, id: &TaskId) -> StorageResult<Task> {
    state
        .tasks
        .get(id)
        .cloned()
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("task")))
}

pub(crate) fn list(state: &State, workspace_id: &WorkspaceId) -> StorageResult<Vec<Task>> {
    Ok(state.tasks.values().filter(|t| &t.workspace_id == workspace_id).cloned().collect())
}

pub(crate) fn patch(
    state: &mut State,
    id: &TaskId,
    patch: TaskPatch,
    now_ms: u64,
) -> StorageResult<Task> {
    let task = state
        .tasks
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("task")))?;
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(output_requirement) = patch.output_requirement {
        task.output_requirement = output_requirement;
    }
    patch.project.apply(&mut task.project);
    task.updated_at_ms = now_ms;
    Ok(task.clone())
}

pub(crate) fn delete(state: &mut State, id: &TaskId) -> StorageResult<()> {
    match state.tasks.get(id) {
        Some(task) if task.status.is_claimed() => {
            Err(StorageError::Kernel(KernelError::conflict("cannot delete a claimed task")))
        }
        Some(_) => {
            state.tasks.remove(id);
            Ok(())
        }
        None => Err(StorageError::Kernel(KernelError::not_found("task"))),
    }
}

/// The only admission gate is `active_worker_count < max_concurrent_workers`.
/// Among claimable tasks, pick the highest priority, breaking ties on
/// `created_at_ms` ascending (oldest first).
pub(crate) fn claim_next(
    state: &mut State,
    workspace_id: &WorkspaceId,
    account_id: &AccountId,
    worker_id: &WorkerId,
    lease_ms: u64,
    now_ms: u64,
) -> StorageResult<ClaimOutcome> {
    let limit = state
        .accounts
        .get(account_id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("account")))?
        .max_concurrent_workers;
    let current = state.workers.values().filter(|w| &w.account_id == account_id && w.status.is_active()).count() as u32;
    if current >= limit {
        return Ok(ClaimOutcome::CapacityExceeded { current, limit });
    }

    let candidate_id = state
        .tasks
        .values()
        .filter(|t| &t.workspace_id == workspace_id && t.status == TaskStatus::Pending)
        .max_by(|a, b| a.priority.cmp(&b.priority).then(b.created_at_ms.cmp(&a.created_at_ms)))
        .map(|t| t.id.clone());

    let Some(candidate_id) = candidate_id else {
        return Ok(ClaimOutcome::NoTaskAvailable);
    };

    let task = state
        .tasks
        .get_mut(&candidate_id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("task")))?;
    task.assign(worker_id.clone(), now_ms, lease_ms);
    Ok(ClaimOutcome::Claimed(Box::new(task.clone())))
}

/// Claim one specific task by id (the `taskId`-targeted path), still gated by
/// the same admission check as [`claim_next`].
pub(crate) fn claim_specific(
    state: &mut State,
    task_id: &TaskId,
    account_id: &AccountId,
    worker_id: &WorkerId,
    lease_ms: u64,
    now_ms: u64,
) -> StorageResult<ClaimOutcome> {
    let limit = state
        .accounts
        .get(account_id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("account")))?
        .max_concurrent_workers;
    let current = state.workers.values().filter(|w| &w.account_id == account_id && w.status.is_active()).count() as u32;
    if current >= limit {
        return Ok(ClaimOutcome::CapacityExceeded { current, limit });
    }

    let task = state
        .tasks
        .get_mut(task_id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("task")))?;
    if task.status != TaskStatus::Pending {
        return Err(StorageError::Kernel(KernelError::conflict(format!(
            "task is {} not pending",
            task.status
        ))));
    }
    task.assign(worker_id.clone(), now_ms, lease_ms);
    Ok(ClaimOutcome::Claimed(Box::new(task.clone())))
}

pub(crate) fn release(state: &mut State, id: &TaskId, now_ms: u64) -> StorageResult<Task> {
    let task = state
        .tasks
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("task")))?;
    task.release(now_ms);
    Ok(task.clone())
}

pub(crate) fn complete(
    state: &mut State,
    id: &TaskId,
    result: TaskResult,
    now_ms: u64,
) -> StorageResult<Task> {
    let task = state
        .tasks
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("task")))?;
    task.complete(result, now_ms);
    Ok(task.clone())
}

pub(crate) fn fail(state: &mut State, id: &TaskId, now_ms: u64) -> StorageResult<Task> {
    let task = state
        .tasks
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("task")))?;
    task.fail(now_ms);
    Ok(task.clone())
}

pub(crate) fn mark_running(state: &mut State, id: &TaskId, now_ms: u64) -> StorageResult<Task> {
    let task = state
        .tasks
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("task")))?;
    task.mark_running(now_ms);
    Ok(task.clone())
}

pub(crate) fn reactivate(
    state: &mut State,
    id: &TaskId,
    worker_id: &WorkerId,
    now_ms: u64,
) -> StorageResult<Task> {
    let task = state
        .tasks
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("task")))?;
    task.reactivate(worker_id.clone(), now_ms);
    Ok(task.clone())
}

pub(crate) fn unblock_dependents(
    state: &mut State,
    completed_id: &TaskId,
    now_ms: u64,
) -> StorageResult<Vec<Task>> {
    let mut unblocked = Vec::new();
    for task in state.tasks.values_mut() {
        if task.status != TaskStatus::Blocked {
            continue;
        }
        if !task.blocked_by_task_ids.iter().any(|id| id == completed_id) {
            continue;
        }
        task.blocked_by_task_ids.retain(|id| id != completed_id);
        if task.blocked_by_task_ids.is_empty() {
            task.unblock(now_ms);
            unblocked.push(task.clone());
        }
    }
    Ok(unblocked)
}

pub(crate) fn list_stale_claims(state: &State, now_ms: u64) -> StorageResult<Vec<Task>> {
    Ok(state
        .tasks
        .values()
        .filter(|t| t.status.is_claimed() && t.is_lease_expired(now_ms))
        .cloned()
        .collect())
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
