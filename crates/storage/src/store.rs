// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Store` trait: the one seam between `relay-engine` and durable state.
//!
//! A production deployment backs this with Postgres; [`crate::memory::MemoryStore`]
//! is the in-process reference implementation used by tests and by
//! `relay-daemon` when no database is configured.

use crate::error::StorageResult;
use async_trait::async_trait;
use relay_core::{
    Account, AccountId, Artifact, ArtifactId, Observation, Runner, RunnerId, Schedule, ScheduleId,
    Skill, SkillId, Task, TaskId, TaskPatch, TaskResult, Worker, WorkerId, WorkerPatch, Workspace,
    WorkspaceId,
};

/// Outcome of [`Store::claim_next_task`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    Claimed(Box<Task>),
    NoTaskAvailable,
    CapacityExceeded { current: u32, limit: u32 },
}

#[async_trait]
pub trait Store: Send + Sync {
    // ---- accounts / workspaces ----
    async fn get_account(&self, id: &AccountId) -> StorageResult<Account>;
    async fn get_workspace(&self, id: &WorkspaceId) -> StorageResult<Workspace>;
    async fn count_active_workers(&self, account_id: &AccountId) -> StorageResult<u32>;

    // ---- tasks ----
    async fn insert_task(&self, task: Task) -> StorageResult<Task>;
    async fn get_task(&self, id: &TaskId) -> StorageResult<Task>;
    async fn list_tasks(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Task>>;
    async fn patch_task(&self, id: &TaskId, patch: TaskPatch, now_ms: u64) -> StorageResult<Task>;
    async fn delete_task(&self, id: &TaskId) -> StorageResult<()>;

    /// Atomically claim the highest-priority claimable task for a workspace,
    /// gated only by `active_worker_count < max_concurrent_workers`. Ties on
    /// priority break on `created_at_ms` ascending.
    async fn claim_next_task(
        &self,
        workspace_id: &WorkspaceId,
        account_id: &AccountId,
        worker_id: &WorkerId,
        lease_ms: u64,
        now_ms: u64,
    ) -> StorageResult<ClaimOutcome>;

    /// Claim a specific task by id, per the explicit-`taskId` path of the
    /// claim operation. `NotFound` if the id is unknown, `Conflict` if the
    /// task is not `pending`; admission is gated identically to
    /// [`Store::claim_next_task`].
    async fn claim_specific_task(
        &self,
        task_id: &TaskId,
        account_id: &AccountId,
        worker_id: &WorkerId,
        lease_ms: u64,
        now_ms: u64,
    ) -> StorageResult<ClaimOutcome>;

    /// Release a claim (lease expiry, explicit release) back to `pending`.
    async fn release_task(&self, id: &TaskId, now_ms: u64) -> StorageResult<Task>;

    /// `running -> completed`, only called once the output gate has passed.
    async fn complete_task(&self, id: &TaskId, result: TaskResult, now_ms: u64) -> StorageResult<Task>;

    /// `running -> failed`.
    async fn fail_task(&self, id: &TaskId, now_ms: u64) -> StorageResult<Task>;

    /// `assigned -> running`, on the first heartbeat PATCH that reports a
    /// non-`starting` worker status. A no-op on any other task status.
    async fn mark_task_running(&self, id: &TaskId, now_ms: u64) -> StorageResult<Task>;

    /// `completed|failed -> assigned`, reclaiming the task for `worker_id`.
    async fn reactivate_task(&self, id: &TaskId, worker_id: &WorkerId, now_ms: u64) -> StorageResult<Task>;

    /// Unblock every task whose `blocked_by_task_ids` is now satisfied by
    /// `completed_id` having reached a terminal state. Returns the tasks that
    /// transitioned `blocked -> pending`.
    async fn unblock_dependents(&self, completed_id: &TaskId, now_ms: u64)
        -> StorageResult<Vec<Task>>;

    /// Tasks whose lease has expired, or whose owning worker is stale, and
    /// are therefore eligible for reassignment.
    async fn list_stale_claims(&self, now_ms: u64) -> StorageResult<Vec<Task>>;

    // ---- workers ----
    async fn insert_worker(&self, worker: Worker) -> StorageResult<Worker>;
    async fn get_worker(&self, id: &WorkerId) -> StorageResult<Worker>;
    async fn list_workers(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Worker>>;
    async fn patch_worker(
        &self,
        id: &WorkerId,
        patch: WorkerPatch,
        now_ms: u64,
    ) -> StorageResult<Worker>;
    /// Workers with no heartbeat-equivalent activity past the stale threshold,
    /// excluding `waiting_input` (which never goes stale).
    async fn list_stale_workers(&self, now_ms: u64, threshold_ms: u64) -> StorageResult<Vec<Worker>>;

    /// `* -> completed`, only called once the output gate has passed.
    async fn complete_worker(&self, id: &WorkerId, now_ms: u64) -> StorageResult<Worker>;

    /// `* -> failed`, recording the reported (or default) error.
    async fn fail_worker(&self, id: &WorkerId, error: String, now_ms: u64) -> StorageResult<Worker>;

    /// `starting -> running`, on the first heartbeat PATCH that reports a
    /// non-`starting` status. A no-op if the worker isn't `starting`.
    async fn promote_worker_running(&self, id: &WorkerId, now_ms: u64) -> StorageResult<Worker>;

    /// `completed|failed -> running`. Increments `sessionGeneration`.
    async fn reactivate_worker(&self, id: &WorkerId, now_ms: u64) -> StorageResult<Worker>;

    // ---- runners ----
    async fn upsert_runner(&self, runner: Runner) -> StorageResult<Runner>;
    async fn heartbeat_runner(
        &self,
        id: &RunnerId,
        active_workers: u32,
        now_ms: u64,
    ) -> StorageResult<Runner>;
    async fn list_active_runners(&self, workspace_id: &WorkspaceId, now_ms: u64) -> StorageResult<Vec<Runner>>;

    // ---- schedules ----
    async fn insert_schedule(&self, schedule: Schedule) -> StorageResult<Schedule>;
    async fn get_schedule(&self, id: &ScheduleId) -> StorageResult<Schedule>;
    async fn list_schedules(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Schedule>>;
    async fn update_schedule(&self, schedule: Schedule) -> StorageResult<Schedule>;
    async fn delete_schedule(&self, id: &ScheduleId) -> StorageResult<()>;
    /// Enabled schedules whose `next_run_at_ms` has arrived.
    async fn list_due_schedules(&self, now_ms: u64) -> StorageResult<Vec<Schedule>>;

    // ---- observations ----
    async fn record_observation(&self, observation: Observation) -> StorageResult<Observation>;
    async fn search_observations(
        &self,
        workspace_id: &WorkspaceId,
        query: &str,
        limit: usize,
    ) -> StorageResult<Vec<Observation>>;
    async fn list_observations(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Observation>>;

    // ---- artifacts ----
    async fn upsert_artifact(&self, artifact: Artifact) -> StorageResult<Artifact>;
    async fn get_artifact(&self, id: &ArtifactId) -> StorageResult<Artifact>;
    async fn get_artifact_by_share_token(&self, token: &str) -> StorageResult<Artifact>;
    async fn list_artifacts(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Artifact>>;
    async fn delete_artifact(&self, id: &ArtifactId) -> StorageResult<()>;

    // ---- skills ----
    async fn insert_skill(&self, skill: Skill) -> StorageResult<Skill>;
    async fn get_skill(&self, id: &SkillId) -> StorageResult<Skill>;
    async fn get_skill_by_slug(&self, workspace_id: &WorkspaceId, slug: &str) -> StorageResult<Skill>;
    async fn update_skill(&self, skill: Skill) -> StorageResult<Skill>;
    async fn delete_skill(&self, id: &SkillId) -> StorageResult<()>;
    async fn list_skills(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Skill>>;
}
