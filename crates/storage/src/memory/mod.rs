// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process reference [`Store`] implementation.
//!
//! All mutation happens inside a single `parking_lot::Mutex`, never held
//! across an `.await` — every method locks, mutates the in-memory maps
//! synchronously, and unlocks before returning. This realizes the same
//! atomic-predicated-update semantics a `SELECT ... FOR UPDATE` /
//! conditional `UPDATE` pair would give a real relational store.

mod account;
mod artifact;
mod observation;
mod runner;
mod schedule;
mod skill;
mod state;
mod task;
mod worker;

use crate::error::StorageResult;
use crate::store::{ClaimOutcome, Store};
use async_trait::async_trait;
use parking_lot::Mutex;
use relay_core::{
    Account, AccountId, Artifact, ArtifactId, Observation, Runner, RunnerId, Schedule, ScheduleId,
    Skill, SkillId, Task, TaskId, TaskPatch, TaskResult, Worker, WorkerId, WorkerPatch, Workspace,
    WorkspaceId,
};
use state::State;

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account directly. The reference store has no account/workspace
    /// creation endpoints of its own (those live upstream of this crate); test
    /// harnesses and `relay-daemon`'s bootstrap call this instead.
    pub fn seed_account(&self, account: Account) {
        let mut state = self.state.lock();
        state.accounts.insert(account.id.clone(), account);
    }

    pub fn seed_workspace(&self, workspace: Workspace) {
        let mut state = self.state.lock();
        state.workspaces.insert(workspace.id.clone(), workspace);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_account(&self, id: &AccountId) -> StorageResult<Account> {
        account::get_account(&self.state.lock(), id)
    }

    async fn get_workspace(&self, id: &WorkspaceId) -> StorageResult<Workspace> {
        account::get_workspace(&self.state.lock(), id)
    }

    async fn count_active_workers(&self, account_id: &AccountId) -> StorageResult<u32> {
        account::count_active_workers(&self.state.lock(), account_id)
    }

    async fn insert_task(&self, t: Task) -> StorageResult<Task> {
        task::insert(&mut self.state.lock(), t)
    }

    async fn get_task(&self, id: &TaskId) -> StorageResult<Task> {
        task::get(&self.state.lock(), id)
    }

    async fn list_tasks(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Task>> {
        task::list(&self.state.lock(), workspace_id)
    }

    async fn patch_task(&self, id: &TaskId, patch: TaskPatch, now_ms: u64) -> StorageResult<Task> {
        task::patch(&mut self.state.lock(), id, patch, now_ms)
    }

    async fn delete_task(&self, id: &TaskId) -> StorageResult<()> {
        task::delete(&mut self.state.lock(), id)
    }

    async fn claim_next_task(
        &self,
        workspace_id: &WorkspaceId,
        account_id: &AccountId,
        worker_id: &WorkerId,
        lease_ms: u64,
        now_ms: u64,
    ) -> StorageResult<ClaimOutcome> {
        task::claim_next(&mut self.state.lock(), workspace_id, account_id, worker_id, lease_ms, now_ms)
    }

    async fn claim_specific_task(
        &self,
        task_id: &TaskId,
        account_id: &AccountId,
        worker_id: &WorkerId,
        lease_ms: u64,
        now_ms: u64,
    ) -> StorageResult<ClaimOutcome> {
        task::claim_specific(&mut self.state.lock(), task_id, account_id, worker_id, lease_ms, now_ms)
    }

    async fn release_task(&self, id: &TaskId, now_ms: u64) -> StorageResult<Task> {
        task::release(&mut self.state.lock(), id, now_ms)
    }

    async fn complete_task(&self, id: &TaskId, result: TaskResult, now_ms: u64) -> StorageResult<Task> {
        task::complete(&mut self.state.lock(), id, result, now_ms)
    }

    async fn fail_task(&self, id: &TaskId, now_ms: u64) -> StorageResult<Task> {
        task::fail(&mut self.state.lock(), id, now_ms)
    }

    async fn mark_task_running(&self, id: &TaskId, now_ms: u64) -> StorageResult<Task> {
        task::mark_running(&mut self.state.lock(), id, now_ms)
    }

    async fn reactivate_task(&self, id: &TaskId, worker_id: &WorkerId, now_ms: u64) -> StorageResult<Task> {
        task::reactivate(&mut self.state.lock(), id, worker_id, now_ms)
    }

    async fn unblock_dependents(
        &self,
        completed_id: &TaskId,
        now_ms: u64,
    ) -> StorageResult<Vec<Task>> {
        task::unblock_dependents(&mut self.state.lock(), completed_id, now_ms)
    }

    async fn list_stale_claims(&self, now_ms: u64) -> StorageResult<Vec<Task>> {
        task::list_stale_claims(&self.state.lock(), now_ms)
    }

    async fn insert_worker(&self, worker: Worker) -> StorageResult<Worker> {
        worker::insert(&mut self.state.lock(), worker)
    }

    async fn get_worker(&self, id: &WorkerId) -> StorageResult<Worker> {
        worker::get(&self.state.lock(), id)
    }

    async fn list_workers(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Worker>> {
        worker::list(&self.state.lock(), workspace_id)
    }

    async fn patch_worker(
        &self,
        id: &WorkerId,
        patch: WorkerPatch,
        now_ms: u64,
    ) -> StorageResult<Worker> {
        worker::patch(&mut self.state.lock(), id, patch, now_ms)
    }

    async fn list_stale_workers(&self, now_ms: u64, threshold_ms: u64) -> StorageResult<Vec<Worker>> {
        worker::list_stale(&self.state.lock(), now_ms, threshold_ms)
    }

    async fn complete_worker(&self, id: &WorkerId, now_ms: u64) -> StorageResult<Worker> {
        worker::complete(&mut self.state.lock(), id, now_ms)
    }

    async fn fail_worker(&self, id: &WorkerId, error: String, now_ms: u64) -> StorageResult<Worker> {
        worker::fail(&mut self.state.lock(), id, error, now_ms)
    }

    async fn promote_worker_running(&self, id: &WorkerId, now_ms: u64) -> StorageResult<Worker> {
        worker::promote_running(&mut self.state.lock(), id, now_ms)
    }

    async fn reactivate_worker(&self, id: &WorkerId, now_ms: u64) -> StorageResult<Worker> {
        worker::reactivate(&mut self.state.lock(), id, now_ms)
    }

    async fn upsert_runner(&self, runner: Runner) -> StorageResult<Runner> {
        runner::upsert(&mut self.state.lock(), runner)
    }

    async fn heartbeat_runner(
        &self,
        id: &RunnerId,
        active_workers: u32,
        now_ms: u64,
    ) -> StorageResult<Runner> {
        runner::heartbeat(&mut self.state.lock(), id, active_workers, now_ms)
    }

    async fn list_active_runners(
        &self,
        workspace_id: &WorkspaceId,
        now_ms: u64,
    ) -> StorageResult<Vec<Runner>> {
        runner::list_active(&self.state.lock(), workspace_id, now_ms)
    }

    async fn insert_schedule(&self, s: Schedule) -> StorageResult<Schedule> {
        schedule::insert(&mut self.state.lock(), s)
    }

    async fn get_schedule(&self, id: &ScheduleId) -> StorageResult<Schedule> {
        schedule::get(&self.state.lock(), id)
    }

    async fn list_schedules(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Schedule>> {
        schedule::list(&self.state.lock(), workspace_id)
    }

    async fn update_schedule(&self, s: Schedule) -> StorageResult<Schedule> {
        schedule::update(&mut self.state.lock(), s)
    }

    async fn delete_schedule(&self, id: &ScheduleId) -> StorageResult<()> {
        schedule::delete(&mut self.state.lock(), id)
    }

    async fn list_due_schedules(&self, now_ms: u64) -> StorageResult<Vec<Schedule>> {
        schedule::list_due(&self.state.lock(), now_ms)
    }

    async fn record_observation(&self, o: Observation) -> StorageResult<Observation> {
        observation::record(&mut self.state.lock(), o)
    }

    async fn search_observations(
        &self,
        workspace_id: &WorkspaceId,
        query: &str,
        limit: usize,
    ) -> StorageResult<Vec<Observation>> {
        observation::search(&self.state.lock(), workspace_id, query, limit)
    }

    async fn list_observations(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Observation>> {
        observation::list(&self.state.lock(), workspace_id)
    }

    async fn upsert_artifact(&self, a: Artifact) -> StorageResult<Artifact> {
        artifact::upsert(&mut self.state.lock(), a)
    }

    async fn get_artifact(&self, id: &ArtifactId) -> StorageResult<Artifact> {
        artifact::get(&self.state.lock(), id)
    }

    async fn get_artifact_by_share_token(&self, token: &str) -> StorageResult<Artifact> {
        artifact::get_by_share_token(&self.state.lock(), token)
    }

    async fn list_artifacts(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Artifact>> {
        artifact::list(&self.state.lock(), workspace_id)
    }

    async fn delete_artifact(&self, id: &ArtifactId) -> StorageResult<()> {
        artifact::delete(&mut self.state.lock(), id)
    }

    async fn insert_skill(&self, s: Skill) -> StorageResult<Skill> {
        skill::insert(&mut self.state.lock(), s)
    }

    async fn get_skill(&self, id: &SkillId) -> StorageResult<Skill> {
        skill::get(&self.state.lock(), id)
    }

    async fn get_skill_by_slug(&self, workspace_id: &WorkspaceId, slug: &str) -> StorageResult<Skill> {
        skill::get_by_slug(&self.state.lock(), workspace_id, slug)
    }

    async fn update_skill(&self, s: Skill) -> StorageResult<Skill> {
        skill::update(&mut self.state.lock(), s)
    }

    async fn delete_skill(&self, id: &SkillId) -> StorageResult<()> {
        skill::delete(&mut self.state.lock(), id)
    }

    async fn list_skills(&self, workspace_id: &WorkspaceId) -> StorageResult<Vec<Skill>> {
        skill::list(&self.state.lock(), workspace_id)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
