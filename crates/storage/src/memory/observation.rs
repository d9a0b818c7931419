// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observation recording and search.

use super::state::State;
use crate::error::StorageResult;
use relay_core::{Observation, WorkspaceId};

pub(crate) fn record(state: &mut State, observation: Observation) -> StorageResult<Observation> {
    state.observations.insert(observation.id.clone(), observation.clone());
    Ok(observation)
}

pub(crate) fn list(state: &State, workspace_id: &WorkspaceId) -> StorageResult<Vec<Observation>> {
    Ok(state.observations.values().filter(|o| &o.workspace_id == workspace_id).cloned().collect())
}

/// Most-recent-first substring/tag match, capped at `limit`.
pub(crate) fn search(
    state: &State,
    workspace_id: &WorkspaceId,
    query: &str,
    limit: usize,
) -> StorageResult<Vec<Observation>> {
    let mut hits: Vec<Observation> = state
        .observations
        .values()
        .filter(|o| &o.workspace_id == workspace_id && o.matches(query))
        .cloned()
        .collect();
    hits.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms));
    hits.truncate(limit);
    Ok(hits)
}

#[cfg(test)]
#[path = "observation_tests.rs"]
mod tests;
