// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task identifier and state machine.
//!
//! ```text
//!    [created] -> pending --------------> assigned --> running --> {completed | failed}
//!                   ^   |                     |            |           |
//!                   |   +--> blocked ---------+            |           |
//!                   |          |                            |           |
//!                   +---- (last blocker terminal-completed) +           |
//!                   ^                                                   |
//!                   +---- (reassign, force or stale) -------------------+
//! ```

use crate::wire_field::ClearableField;
use crate::worker::WorkerId;
use crate::workspace::WorkspaceId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

crate::define_id! {
    /// Unique identifier for a task.
    pub struct TaskId("tsk-");
}

/// Lifecycle status of a task. See module docs for the full transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Blocked,
    Assigned,
    Running,
    Completed,
    Failed,
}

crate::simple_display! {
    TaskStatus {
        Pending => "pending",
        Blocked => "blocked",
        Assigned => "assigned",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
    }
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn is_claimable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// States in which a task's `claimedBy` must name a live worker.
    pub fn is_claimed(&self) -> bool {
        matches!(self, Self::Assigned | Self::Running)
    }
}

/// Whether a task runs to completion or pauses for a plan to be approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskMode {
    Execute,
    Planning,
}

/// What the output-completion gate (engine) requires before a worker may
/// close out this task as `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputRequirement {
    Auto,
    PrRequired,
    ArtifactRequired,
    None,
}

impl Default for OutputRequirement {
    fn default() -> Self {
        Self::Auto
    }
}

/// One entry in a task's phase timeline, extracted from worker milestones
/// of type `phase` on completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub label: String,
    pub ts_ms: u64,
}

/// Snapshot of a worker's output, copied onto the task when it completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub commits: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(default)]
    pub lines_added: u32,
    #[serde(default)]
    pub lines_removed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
    #[serde(default)]
    pub phase_timeline: Vec<PhaseEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_output: Option<serde_json::Value>,
}

/// The unit of work. See the coordination spec's Task Store section for the
/// full invariant list; the most important ones are enforced by the
/// constructors/transition methods below rather than left to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub workspace_id: WorkspaceId,
    pub title: String,
    pub description: String,
    /// 0-10, higher claims first.
    pub priority: u8,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub blocked_by_task_ids: Vec<TaskId>,
    pub mode: TaskMode,
    #[serde(default)]
    pub output_requirement: OutputRequirement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<serde_json::Value>,
    #[serde(default)]
    pub context: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<WorkerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskResult>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl Task {
    /// Construct a new task. Status is derived from `blocked_by_task_ids`:
    /// non-empty => `blocked`, empty => `pending`.
    pub fn new(
        workspace_id: WorkspaceId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: u8,
        blocked_by_task_ids: Vec<TaskId>,
        mode: TaskMode,
        output_requirement: OutputRequirement,
        now_ms: u64,
    ) -> Self {
        let status = if blocked_by_task_ids.is_empty() { TaskStatus::Pending } else { TaskStatus::Blocked };
        Self {
            id: TaskId::new(),
            workspace_id,
            title: title.into(),
            description: description.into(),
            priority: priority.min(10),
            status,
            project: None,
            blocked_by_task_ids,
            mode,
            output_requirement,
            output_schema: None,
            context: HashMap::new(),
            claimed_by: None,
            claimed_at_ms: None,
            expires_at_ms: None,
            result: None,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }

    /// `pending -> assigned` via the Claim Engine.
    pub fn assign(&mut self, worker_id: WorkerId, now_ms: u64, lease_ms: u64) {
        self.status = TaskStatus::Assigned;
        self.claimed_by = Some(worker_id);
        self.claimed_at_ms = Some(now_ms);
        self.expires_at_ms = Some(now_ms + lease_ms);
        self.updated_at_ms = now_ms;
    }

    /// `assigned -> running` on the worker's first non-starting heartbeat.
    pub fn mark_running(&mut self, now_ms: u64) {
        if self.status == TaskStatus::Assigned {
            self.status = TaskStatus::Running;
            self.updated_at_ms = now_ms;
        }
    }

    /// `running -> completed`, only called after the output gate passes.
    pub fn complete(&mut self, result: TaskResult, now_ms: u64) {
        self.status = TaskStatus::Completed;
        self.result = Some(result);
        self.updated_at_ms = now_ms;
    }

    /// `running -> failed`.
    pub fn fail(&mut self, now_ms: u64) {
        self.status = TaskStatus::Failed;
        self.updated_at_ms = now_ms;
    }

    /// Reactivation: `completed -> assigned`. Clearing the worker's
    /// `completedAt`/`error` is the caller's (Worker) responsibility.
    pub fn reactivate(&mut self, worker_id: WorkerId, now_ms: u64) {
        self.status = TaskStatus::Assigned;
        self.claimed_by = Some(worker_id);
        self.updated_at_ms = now_ms;
    }

    /// Reset to `pending` after a reassignment, clearing the claim.
    pub fn release(&mut self, now_ms: u64) {
        self.status = TaskStatus::Pending;
        self.claimed_by = None;
        self.claimed_at_ms = None;
        self.expires_at_ms = None;
        self.updated_at_ms = now_ms;
    }

    /// `pending -> blocked`, occurs only on dependency insertion.
    pub fn block_on(&mut self, blocker_ids: Vec<TaskId>, now_ms: u64) {
        self.blocked_by_task_ids = blocker_ids;
        self.status = TaskStatus::Blocked;
        self.updated_at_ms = now_ms;
    }

    /// `blocked -> pending`, occurs only when the last blocker becomes
    /// terminal-completed.
    pub fn unblock(&mut self, now_ms: u64) {
        self.blocked_by_task_ids.clear();
        self.status = TaskStatus::Pending;
        self.updated_at_ms = now_ms;
    }

    pub fn is_lease_expired(&self, now_ms: u64) -> bool {
        self.expires_at_ms.map(|exp| exp < now_ms).unwrap_or(false)
    }
}

/// `PATCH /tasks/{id}` partial update. Every field is independently
/// optional; the kernel only touches fields that are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "ClearableField::is_absent")]
    pub project: ClearableField<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_requirement: Option<OutputRequirement>,
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
