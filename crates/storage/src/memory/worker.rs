// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker CRUD and the stale-worker query.

use super::state::State;
use crate::error::{StorageError, StorageResult};
use relay_core::{KernelError, Worker, WorkerId, WorkerPatch, WorkspaceId};

pub(crate) fn insert(state: &mut State, worker: Worker) -> StorageResult<Worker> {
    state.workers.insert(worker.id.clone(), worker.clone());
    Ok(worker)
}

pub(crate) fn get(state: &State, id: &WorkerId) -> StorageResult<Worker> {
    state
        .workers
        .get(id)
        .cloned()
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("worker")))
}

pub(crate) fn list(state: &State, workspace_id: &WorkspaceId) -> StorageResult<Vec<Worker>> {
    Ok(state.workers.values().filter(|w| &w.workspace_id == workspace_id).cloned().collect())
}

pub(crate) fn patch(
    state: &mut State,
    id: &WorkerId,
    patch: WorkerPatch,
    now_ms: u64,
) -> StorageResult<Worker> {
    let worker = state
        .workers
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("worker")))?;
    if let Some(status) = patch.status {
        worker.status = status;
    }
    patch.error.apply(&mut worker.error);
    if let Some(current_action) = patch.current_action {
        worker.current_action = Some(current_action);
    }
    if let Some(cost_usd) = patch.cost_usd {
        worker.cost_usd = cost_usd;
    }
    if let Some(turns) = patch.turns {
        worker.turns = turns;
    }
    if let Some(input_tokens) = patch.input_tokens {
        worker.input_tokens = input_tokens;
    }
    if let Some(output_tokens) = patch.output_tokens {
        worker.output_tokens = output_tokens;
    }
    patch.local_ui_url.apply(&mut worker.local_ui_url);
    if !patch.new_milestones.is_empty() {
        worker.append_milestones(patch.new_milestones, now_ms);
    }
    patch.waiting_for.apply(&mut worker.waiting_for);
    if let Some(git) = patch.git {
        worker.git = git;
    }
    if let Some(pull_request) = patch.pull_request {
        worker.pull_request = pull_request;
    }
    patch.pending_instructions.apply(&mut worker.pending_instructions);
    if let Some(result_meta) = patch.result_meta {
        worker.result_meta = Some(result_meta);
    }
    patch.plan_start_message_index.apply(&mut worker.plan_start_message_index);
    patch.plan_content.apply(&mut worker.plan_content);
    worker.updated_at_ms = now_ms;
    Ok(worker.clone())
}

pub(crate) fn complete(state: &mut State, id: &WorkerId, now_ms: u64) -> StorageResult<Worker> {
    let worker = state
        .workers
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("worker")))?;
    worker.complete(now_ms);
    Ok(worker.clone())
}

pub(crate) fn fail(state: &mut State, id: &WorkerId, error: String, now_ms: u64) -> StorageResult<Worker> {
    let worker = state
        .workers
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("worker")))?;
    worker.fail(error, now_ms);
    Ok(worker.clone())
}

pub(crate) fn promote_running(state: &mut State, id: &WorkerId, now_ms: u64) -> StorageResult<Worker> {
    let worker = state
        .workers
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("worker")))?;
    worker.promote_running(now_ms);
    Ok(worker.clone())
}

pub(crate) fn reactivate(state: &mut State, id: &WorkerId, now_ms: u64) -> StorageResult<Worker> {
    let worker = state
        .workers
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("worker")))?;
    worker.reactivate(now_ms);
    Ok(worker.clone())
}

/// Workers past `threshold_ms` since their last update, excluding
/// `waiting_input` (which never goes stale) and already-terminal workers.
pub(crate) fn list_stale(state: &State, now_ms: u64, threshold_ms: u64) -> StorageResult<Vec<Worker>> {
    Ok(state
        .workers
        .values()
        .filter(|w| {
            !w.is_waiting()
                && !w.status.is_terminal()
                && now_ms.saturating_sub(w.updated_at_ms) > threshold_ms
        })
        .cloned()
        .collect())
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
