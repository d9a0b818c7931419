// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact upsert-by-key and lookup.

use super::state::State;
use crate::error::{StorageError, StorageResult};
use relay_core::{Artifact, ArtifactId, KernelError, WorkspaceId};

/// Upsert by `(workspace_id, key)` when `key` is present: an existing
/// artifact with the same key is updated in place (same id, content
/// replaced); otherwise a new artifact is inserted.
pub(crate) fn upsert(state: &mut State, mut artifact: Artifact) -> StorageResult<Artifact> {
    if let Some(key) = artifact.key.clone() {
        let existing_id = state
            .artifacts
            .values()
            .find(|a| a.workspace_id == artifact.workspace_id && a.key.as_deref() == Some(key.as_str()))
            .map(|a| a.id.clone());
        if let Some(existing_id) = existing_id {
            artifact.id = existing_id;
        }
    }
    state.artifacts.insert(artifact.id.clone(), artifact.clone());
    Ok(artifact)
}

pub(crate) fn get(state: &State, id: &ArtifactId) -> StorageResult<Artifact> {
    state
        .artifacts
        .get(id)
        .cloned()
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("artifact")))
}

pub(crate) fn get_by_share_token(state: &State, token: &str) -> StorageResult<Artifact> {
    state
        .artifacts
        .values()
        .find(|a| a.share_token == token)
        .cloned()
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("artifact")))
}

pub(crate) fn list(state: &State, workspace_id: &WorkspaceId) -> StorageResult<Vec<Artifact>> {
    Ok(state.artifacts.values().filter(|a| &a.workspace_id == workspace_id).cloned().collect())
}

pub(crate) fn delete(state: &mut State, id: &ArtifactId) -> StorageResult<()> {
    state
        .artifacts
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("artifact")))
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
