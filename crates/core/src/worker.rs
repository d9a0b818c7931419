// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker identifier and state machine: one execution attempt for one task.

use crate::account::AccountId;
use crate::task::TaskId;
use crate::wire_field::ClearableField;
use crate::workspace::WorkspaceId;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a worker instance.
    pub struct WorkerId("wkr-");
}

/// Milestones are append-only within a worker's lifetime but truncated to
/// the 50 most recent on persistence (see [`Worker::append_milestones`]).
pub const MILESTONE_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Starting,
    Running,
    WaitingInput,
    Idle,
    Completed,
    Failed,
    Stale,
}

crate::simple_display! {
    WorkerStatus {
        Starting => "starting",
        Running => "running",
        WaitingInput => "waiting_input",
        Idle => "idle",
        Completed => "completed",
        Failed => "failed",
        Stale => "stale",
    }
}

impl WorkerStatus {
    /// Statuses counted against `account.maxConcurrentWorkers` by the Claim
    /// Engine's admission check.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Starting | Self::Running | Self::WaitingInput | Self::Idle)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Stale)
    }
}

/// A single milestone emitted by the runner as the agent progresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub ts_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_count: Option<u32>,
}

/// What kind of pause this is: a plan ready for review, or a free-form
/// question from the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitingKind {
    Question,
    PlanApproval,
}

/// A paused tool-use the runner must hold open until an external answer
/// arrives (see the Plan Approval Subsystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingFor {
    #[serde(rename = "type")]
    pub kind: WaitingKind,
    pub prompt: String,
    pub tool_use_id: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// One entry in a worker's session transcript, as reported by the runner.
/// Only `AssistantText` contributes to `planContent`; tool-use entries and
/// everything else (the initial system message, the final result) are
/// excluded even when they fall inside the plan range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionMessage {
    AssistantText { text: String },
    ToolUse { name: String },
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit_sha: Option<String>,
    #[serde(default)]
    pub commit_count: u32,
    #[serde(default)]
    pub files_changed: u32,
    #[serde(default)]
    pub lines_added: u32,
    #[serde(default)]
    pub lines_removed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequestStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,
}

/// One execution attempt against one task, owned by an agent account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub account_id: AccountId,
    pub task_id: TaskId,
    pub workspace_id: WorkspaceId,
    pub status: WorkerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub cost_usd: f64,
    #[serde(default)]
    pub turns: u32,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_ui_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_action: Option<String>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_for: Option<WaitingFor>,
    #[serde(default)]
    pub git: GitStats,
    #[serde(default)]
    pub pull_request: PullRequestStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_instructions: Option<String>,
    /// Message offset captured on `EnterPlanMode`; `None` outside plan mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_start_message_index: Option<u32>,
    /// The approved (or revised) plan text, preserved across approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_content: Option<String>,
    /// Monotonic; incremented on every new agent session for this worker.
    pub session_generation: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_meta: Option<serde_json::Value>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl Worker {
    pub fn new(
        account_id: AccountId,
        task_id: TaskId,
        workspace_id: WorkspaceId,
        now_ms: u64,
    ) -> Self {
        Self {
            id: WorkerId::new(),
            account_id,
            task_id,
            workspace_id,
            status: WorkerStatus::Starting,
            branch: None,
            started_at_ms: None,
            completed_at_ms: None,
            error: None,
            cost_usd: 0.0,
            turns: 0,
            input_tokens: 0,
            output_tokens: 0,
            local_ui_url: None,
            current_action: None,
            milestones: Vec::new(),
            waiting_for: None,
            git: GitStats::default(),
            pull_request: PullRequestStats::default(),
            pending_instructions: None,
            plan_start_message_index: None,
            plan_content: None,
            session_generation: 1,
            result_meta: None,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }

    /// `starting -> running` on the session's first non-init message.
    pub fn promote_running(&mut self, now_ms: u64) {
        if self.status == WorkerStatus::Starting {
            self.status = WorkerStatus::Running;
            self.started_at_ms.get_or_insert(now_ms);
            self.updated_at_ms = now_ms;
        }
    }

    /// `running -> waiting_input` on `EnterPlanMode`/`ExitPlanMode`/`AskUserQuestion`.
    pub fn enter_waiting(&mut self, waiting_for: WaitingFor, now_ms: u64) {
        self.status = WorkerStatus::WaitingInput;
        self.waiting_for = Some(waiting_for);
        self.updated_at_ms = now_ms;
    }

    /// `waiting_input -> running` on answer delivery.
    pub fn resume_running(&mut self, now_ms: u64) {
        self.status = WorkerStatus::Running;
        self.waiting_for = None;
        self.updated_at_ms = now_ms;
    }

    /// `running -> completed`, only after the output gate passes.
    pub fn complete(&mut self, now_ms: u64) {
        self.status = WorkerStatus::Completed;
        self.completed_at_ms = Some(now_ms);
        self.updated_at_ms = now_ms;
    }

    /// `* -> failed`, with a distinguishing error message.
    pub fn fail(&mut self, error: impl Into<String>, now_ms: u64) {
        self.status = WorkerStatus::Failed;
        self.error = Some(error.into());
        self.completed_at_ms = Some(now_ms);
        self.updated_at_ms = now_ms;
    }

    /// `* -> stale`, set by the stale checker. Equivalent to `failed` for
    /// dispatch purposes but distinguishable in reports.
    pub fn mark_stale(&mut self, now_ms: u64) {
        self.status = WorkerStatus::Stale;
        self.error = Some("stale: no activity within threshold".to_string());
        self.completed_at_ms = Some(now_ms);
        self.updated_at_ms = now_ms;
    }

    /// `completed|failed -> running`. Increments `session_generation`,
    /// clears `completed_at`/`error`.
    pub fn reactivate(&mut self, now_ms: u64) -> u32 {
        self.status = WorkerStatus::Running;
        self.completed_at_ms = None;
        self.error = None;
        self.session_generation += 1;
        self.updated_at_ms = now_ms;
        self.session_generation
    }

    /// Merge newly reported milestones and truncate to [`MILESTONE_CAP`]
    /// most recent. The cap is enforced here (at persist time), not at the
    /// point the runner appends one milestone at a time.
    pub fn append_milestones(&mut self, mut new: Vec<Milestone>, now_ms: u64) {
        self.milestones.append(&mut new);
        if self.milestones.len() > MILESTONE_CAP {
            let excess = self.milestones.len() - MILESTONE_CAP;
            self.milestones.drain(0..excess);
        }
        self.updated_at_ms = now_ms;
    }

    /// Whether this worker currently satisfies `waiting_input` and must
    /// never be marked stale regardless of elapsed time.
    pub fn is_waiting(&self) -> bool {
        self.status == WorkerStatus::WaitingInput
    }
}

/// `PATCH /workers/{id}` partial update. Every field is independently
/// optional; clearable fields (`error`, `waiting_for`, `local_ui_url`,
/// `pending_instructions`) distinguish absent from explicit null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkerStatus>,
    #[serde(default, skip_serializing_if = "ClearableField::is_absent")]
    pub error: ClearableField<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "ClearableField::is_absent")]
    pub local_ui_url: ClearableField<String>,
    #[serde(default)]
    pub new_milestones: Vec<Milestone>,
    #[serde(default, skip_serializing_if = "ClearableField::is_absent")]
    pub waiting_for: ClearableField<WaitingFor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestStats>,
    #[serde(default, skip_serializing_if = "ClearableField::is_absent")]
    pub pending_instructions: ClearableField<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "ClearableField::is_absent")]
    pub plan_start_message_index: ClearableField<u32>,
    #[serde(default, skip_serializing_if = "ClearableField::is_absent")]
    pub plan_content: ClearableField<String>,
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
