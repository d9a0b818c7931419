// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule CRUD and the due-schedule query the scheduler tick polls.

use super::state::State;
use crate::error::{StorageError, StorageResult};
use relay_core::{KernelError, Schedule, ScheduleId, WorkspaceId};

pub(crate) fn insert(state: &mut State, schedule: Schedule) -> StorageResult<Schedule> {
    state.schedules.insert(schedule.id.clone(), schedule.clone());
    Ok(schedule)
}

pub(crate) fn get(state: &State, id: &ScheduleId) -> StorageResult<Schedule> {
    state
        .schedules
        .get(id)
        .cloned()
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("schedule")))
}

pub(crate) fn list(state: &State, workspace_id: &WorkspaceId) -> StorageResult<Vec<Schedule>> {
    Ok(state.schedules.values().filter(|s| &s.workspace_id == workspace_id).cloned().collect())
}

pub(crate) fn update(state: &mut State, schedule: Schedule) -> StorageResult<Schedule> {
    if !state.schedules.contains_key(&schedule.id) {
        return Err(StorageError::Kernel(KernelError::not_found("schedule")));
    }
    state.schedules.insert(schedule.id.clone(), schedule.clone());
    Ok(schedule)
}

pub(crate) fn delete(state: &mut State, id: &ScheduleId) -> StorageResult<()> {
    state
        .schedules
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("schedule")))
}

pub(crate) fn list_due(state: &State, now_ms: u64) -> StorageResult<Vec<Schedule>> {
    Ok(state
        .schedules
        .values()
        .filter(|s| s.enabled && s.next_run_at_ms.is_some_and(|t| t <= now_ms))
        .cloned()
        .collect())
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
