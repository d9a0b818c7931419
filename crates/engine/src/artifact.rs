// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact Store orchestration: upsert-by-`(workspace_id, key)`, minting a
//! share token only on first insert so a re-upsert never invalidates a link
//! someone already shared.

use crate::dispatch::{publish_best_effort, Bus};
use crate::error::EngineResult;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use relay_core::{Artifact, ArtifactId, ArtifactType, Channel, Event, WorkerId, WorkspaceId};
use relay_storage::Store;
use std::collections::HashMap;

pub struct UpsertArtifactRequest {
    pub worker_id: WorkerId,
    pub workspace_id: WorkspaceId,
    pub key: Option<String>,
    pub kind: ArtifactType,
    pub title: String,
    pub content: String,
    pub metadata: HashMap<String, String>,
}

fn mint_share_token() -> String {
    let mut bytes = [0u8; 24];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Upsert an artifact. If `key` is set and an artifact with that
/// `(workspace_id, key)` already exists, its `id` and `share_token` are
/// preserved and the rest of the record is replaced in place.
pub async fn upsert(store: &dyn Store, bus: &dyn Bus, req: UpsertArtifactRequest, now_ms: u64) -> EngineResult<Artifact> {
    let existing = match &req.key {
        Some(key) => store
            .list_artifacts(&req.workspace_id)
            .await?
            .into_iter()
            .find(|a| a.key.as_deref() == Some(key.as_str())),
        None => None,
    };

    let (id, share_token, created_at_ms) = match existing {
        Some(a) => (a.id, a.share_token, a.created_at_ms),
        None => (ArtifactId::new(), mint_share_token(), now_ms),
    };

    let artifact = Artifact {
        id,
        worker_id: req.worker_id,
        workspace_id: req.workspace_id.clone(),
        key: req.key,
        kind: req.kind,
        title: req.title,
        content: req.content,
        metadata: req.metadata,
        share_token,
        created_at_ms,
        updated_at_ms: now_ms,
    };
    let artifact = store.upsert_artifact(artifact).await?;

    tracing::info!(artifact_id = %artifact.id, workspace_id = %artifact.workspace_id, "artifact upserted");
    publish_best_effort(
        bus,
        Channel::Workspace(artifact.workspace_id.clone()),
        Event::ArtifactUpserted { artifact_id: artifact.id.clone(), workspace_id: artifact.workspace_id.clone() },
    )
    .await;

    Ok(artifact)
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
