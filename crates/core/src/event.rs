// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain events published to the Dispatch Bus.
//!
//! Serializes with `{"type": "event:name", ...fields}` format, matching the
//! teacher's event-tagging convention. Channel identity (`workspace-<id>`,
//! `worker-<id>`, `task-<id>`) is computed by [`Channel`], not carried on
//! the event itself.

use crate::artifact::ArtifactId;
use crate::task::Task;
use crate::worker::Worker;
use crate::workspace::WorkspaceId;
use serde::{Deserialize, Serialize};

/// Events that cross the Dispatch Bus. Delivery is at-least-once;
/// consumers must be idempotent (see [`crate::worker::Worker::session_generation`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "task:assigned")]
    TaskAssigned {
        task: Task,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_local_ui_url: Option<String>,
    },

    #[serde(rename = "task:claimed")]
    TaskClaimed { task: Task },

    #[serde(rename = "task:unblocked")]
    TaskUnblocked { task: Task },

    #[serde(rename = "worker:started")]
    WorkerStarted { worker: Worker },

    #[serde(rename = "worker:progress")]
    WorkerProgress { worker: Worker },

    #[serde(rename = "worker:completed")]
    WorkerCompleted { worker: Worker },

    #[serde(rename = "worker:failed")]
    WorkerFailed { worker: Worker },

    #[serde(rename = "skill:install")]
    SkillInstall {
        slug: String,
        name: String,
        description: String,
        content: String,
        content_hash: String,
        #[serde(default)]
        reference_files: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        installer_command: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_local_ui_url: Option<String>,
    },

    #[serde(rename = "plan:approved")]
    PlanApproved { worker: Worker, bypass_permissions: bool },

    #[serde(rename = "plan:revision")]
    PlanRevision { worker: Worker, feedback: String },

    #[serde(rename = "artifact:upserted")]
    ArtifactUpserted { artifact_id: ArtifactId, workspace_id: WorkspaceId },
}

/// The bus channel an event is published on. Per-channel FIFO is not
/// guaranteed; consumers must be idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Workspace(WorkspaceId),
    Worker(crate::worker::WorkerId),
    Task(crate::task::TaskId),
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Workspace(id) => write!(f, "workspace-{id}"),
            Self::Worker(id) => write!(f, "worker-{id}"),
            Self::Task(id) => write!(f, "task-{id}"),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
