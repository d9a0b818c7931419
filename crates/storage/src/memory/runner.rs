// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner registration and heartbeat.

use super::state::State;
use crate::error::{StorageError, StorageResult};
use relay_core::{KernelError, Runner, RunnerId, WorkspaceId};

pub(crate) fn upsert(state: &mut State, runner: Runner) -> StorageResult<Runner> {
    state.runners.insert(runner.id.clone(), runner.clone());
    Ok(runner)
}

pub(crate) fn heartbeat(
    state: &mut State,
    id: &RunnerId,
    active_workers: u32,
    now_ms: u64,
) -> StorageResult<Runner> {
    let runner = state
        .runners
        .get_mut(id)
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("runner")))?;
    runner.active_workers = active_workers;
    runner.last_heartbeat_at_ms = now_ms;
    Ok(runner.clone())
}

pub(crate) fn list_active(
    state: &State,
    workspace_id: &WorkspaceId,
    now_ms: u64,
) -> StorageResult<Vec<Runner>> {
    Ok(state
        .runners
        .values()
        .filter(|r| r.advertises(workspace_id) && r.is_active(now_ms))
        .cloned()
        .collect())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
