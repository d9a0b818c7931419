// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact: a shareable deliverable produced by a worker.

use crate::worker::WorkerId;
use crate::workspace::WorkspaceId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

crate::define_id! {
    /// Unique identifier for an artifact.
    pub struct ArtifactId("art-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Content,
    Report,
    Data,
    Link,
    Summary,
    TaskPlan,
}

/// A named, shareable deliverable. Reachable via `(workspace_id, key)` for
/// upsert, but owned by the worker that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    pub worker_id: WorkerId,
    pub workspace_id: WorkspaceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub kind: ArtifactType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub share_token: String,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
