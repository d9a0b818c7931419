// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test-only builders for domain types, built with the [`crate::builder!`] macro.

use crate::account::{Account, AccountId};
use crate::task::{OutputRequirement, Task, TaskId, TaskMode, TaskStatus};
use crate::worker::{Worker, WorkerId, WorkerStatus};
use crate::workspace::WorkspaceId;

crate::builder! {
    pub struct TaskBuilder => Task {
        into {
            title: String = "test task",
            description: String = "",
        }
        set {
            priority: u8 = 5,
            blocked_by_task_ids: Vec<TaskId> = Vec::new(),
            status: TaskStatus = TaskStatus::Pending,
            mode: TaskMode = TaskMode::Execute,
            output_requirement: OutputRequirement = OutputRequirement::Auto,
            workspace_id: WorkspaceId = WorkspaceId::new(),
        }
        computed {
            id: TaskId = TaskId::new(),
            project: Option<String> = None,
            output_schema: Option<serde_json::Value> = None,
            context: std::collections::HashMap<String, String> = std::collections::HashMap::new(),
            claimed_by: Option<WorkerId> = None,
            claimed_at_ms: Option<u64> = None,
            expires_at_ms: Option<u64> = None,
            result: Option<crate::task::TaskResult> = None,
            created_at_ms: u64 = 0,
            updated_at_ms: u64 = 0,
        }
    }
}

impl TaskBuilder {
    /// Set blockers and move the built task to `blocked` status.
    pub fn blocked_by(mut self, ids: Vec<TaskId>) -> Self {
        self.blocked_by_task_ids = ids;
        self.status = TaskStatus::Blocked;
        self
    }
}

crate::builder! {
    pub struct WorkerBuilder => Worker {
        set {
            account_id: AccountId = AccountId::new(),
            task_id: TaskId = TaskId::new(),
            workspace_id: WorkspaceId = WorkspaceId::new(),
            status: WorkerStatus = WorkerStatus::Starting,
        }
        computed {
            id: WorkerId = WorkerId::new(),
            branch: Option<String> = None,
            started_at_ms: Option<u64> = None,
            completed_at_ms: Option<u64> = None,
            error: Option<String> = None,
            cost_usd: f64 = 0.0,
            turns: u32 = 0,
            input_tokens: u64 = 0,
            output_tokens: u64 = 0,
            local_ui_url: Option<String> = None,
            current_action: Option<String> = None,
            milestones: Vec<crate::worker::Milestone> = Vec::new(),
            waiting_for: Option<crate::worker::WaitingFor> = None,
            git: crate::worker::GitStats = crate::worker::GitStats::default(),
            pull_request: crate::worker::PullRequestStats = crate::worker::PullRequestStats::default(),
            pending_instructions: Option<String> = None,
            plan_start_message_index: Option<u32> = None,
            plan_content: Option<String> = None,
            session_generation: u32 = 1,
            result_meta: Option<serde_json::Value> = None,
            created_at_ms: u64 = 0,
            updated_at_ms: u64 = 0,
        }
    }
}

pub fn new_account(max_concurrent_workers: u32) -> Account {
    Account { id: AccountId::new(), name: "test account".into(), max_concurrent_workers }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
