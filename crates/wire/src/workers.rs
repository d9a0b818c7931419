// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/workers*` request/response bodies.

use relay_core::{Artifact, ArtifactType, RunnerId, SessionMessage, TaskId, Worker, WorkspaceId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `POST /workers/claim`. An absent `task_id` claims the highest-priority
/// pending task in scope; a present one claims that exact task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkersResponse {
    pub workers: Vec<Worker>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkerResponse {
    pub worker: Worker,
}

/// `GET /workers/active`: the runner registry snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveLocalUi {
    pub runner_id: RunnerId,
    pub url: String,
    pub workspace_ids: Vec<WorkspaceId>,
    pub capacity: u32,
    pub active_workers: u32,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWorkersResponse {
    pub active_local_uis: Vec<ActiveLocalUi>,
}

/// `PATCH /workers/{id}` response: the updated worker plus any pending
/// instructions the runner should act on immediately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkerUpdateResponse {
    #[serde(flatten)]
    pub worker: Worker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// `POST /workers/{id}/artifacts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtifactRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub kind: ArtifactType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactResponse {
    pub artifact: Artifact,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactsResponse {
    pub artifacts: Vec<Artifact>,
}

/// `POST /workers/{id}/plan/enter`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnterPlanModeRequest {
    pub plan_start_message_index: u32,
}

/// `POST /workers/{id}/plan/exit`: the agent has a plan ready for review.
/// `messages` is the full session transcript; `planContent` is extracted
/// from it kernel-side rather than trusted from the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExitPlanModeRequest {
    pub messages: Vec<SessionMessage>,
    pub tool_use_id: String,
}

/// `POST /workers/{id}/plan/respond`. `feedback` is only meaningful when
/// `decision` is `"request_changes"`; any non-bypass/review free text is a
/// change request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RespondToPlanRequest {
    pub decision: PlanDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanDecision {
    Bypass,
    Review,
    RequestChanges,
}

#[cfg(test)]
#[path = "workers_tests.rs"]
mod tests;
