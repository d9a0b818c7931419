// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observation Index: a naive substring/tag index over workspace-scoped
//! notes, plus the two read shapes agents need when loading context —
//! a recency digest and a batch-by-id fetch.

use crate::error::EngineResult;
use indexmap::IndexMap;
use relay_core::{Observation, ObservationId, ObservationType, WorkspaceId};
use relay_storage::Store;

/// Fields needed to record a new observation; id and timestamp are assigned
/// here rather than left to the caller.
pub struct NewObservation {
    pub workspace_id: WorkspaceId,
    pub kind: ObservationType,
    pub title: String,
    pub content: String,
    pub files: Vec<String>,
    pub concepts: Vec<String>,
}

pub async fn record(store: &dyn Store, new: NewObservation, now_ms: u64) -> EngineResult<Observation> {
    let observation = Observation {
        id: ObservationId::new(),
        workspace_id: new.workspace_id,
        kind: new.kind,
        title: new.title,
        content: new.content,
        files: new.files,
        concepts: new.concepts,
        created_at_ms: now_ms,
    };
    Ok(store.record_observation(observation).await?)
}

pub async fn search(
    store: &dyn Store,
    workspace_id: &WorkspaceId,
    query: &str,
    limit: usize,
) -> EngineResult<Vec<Observation>> {
    Ok(store.search_observations(workspace_id, query, limit).await?)
}

/// One type-grouped slice of the recency digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestGroup {
    pub kind: ObservationType,
    pub observations: Vec<Observation>,
}

const DIGEST_SIZE: usize = 20;

/// The most recent [`DIGEST_SIZE`] observations in the workspace, newest
/// first, grouped by type in the order each type was first encountered —
/// which, since the source is already newest-first, makes each group's
/// first entry its most recent one too.
pub async fn compact_digest(store: &dyn Store, workspace_id: &WorkspaceId) -> EngineResult<Vec<DigestGroup>> {
    let mut all = store.list_observations(workspace_id).await?;
    all.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms));
    all.truncate(DIGEST_SIZE);

    let mut groups: IndexMap<ObservationType, Vec<Observation>> = IndexMap::new();
    for observation in all {
        groups.entry(observation.kind).or_default().push(observation);
    }
    Ok(groups.into_iter().map(|(kind, observations)| DigestGroup { kind, observations }).collect())
}

/// Fetch many observations by id, silently dropping unknown ids.
pub async fn batch(
    store: &dyn Store,
    workspace_id: &WorkspaceId,
    ids: &[ObservationId],
) -> EngineResult<Vec<Observation>> {
    let all = store.list_observations(workspace_id).await?;
    Ok(all.into_iter().filter(|o| ids.contains(&o.id)).collect())
}

#[cfg(test)]
#[path = "observation_tests.rs"]
mod tests;
