// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Kernel facade: one async method per surface the (unbuilt) HTTP layer
//! would expose, built directly on `relay-engine`'s operations and
//! `relay-storage::Store`. Request bodies are `relay-wire` types so a router
//! can deserialize straight into a call; most responses are plain
//! `relay-core` domain types or an engine decision enum, since collapsing
//! those into one wire shape up front would throw away the branch a status
//! code needs (429 vs 200, 400 vs 200, ...).

use relay_core::{
    Artifact, ArtifactId, Channel, Clock, Event, KernelError, Observation,
    ObservationId, Runner, Schedule, ScheduleId, Skill, SkillId, SkillOrigin, SystemClock, Task,
    TaskId, TaskPatch, TaskResult, Worker, WorkerId, WorkerPatch, WorkerStatus,
    WorkspaceId,
};
use relay_engine::artifact::{self, UpsertArtifactRequest};
use relay_engine::claim::{self, ClaimRequest, ClaimResult};
use relay_engine::dispatch::{publish_best_effort, Bus};
use relay_engine::error::{EngineError, EngineResult};
use relay_engine::gate;
use relay_engine::observation::{self, DigestGroup, NewObservation};
use relay_engine::plan::{self, PlanResponse};
use relay_engine::reassign::{self, ReassignOutcome, ReassignRequest};
use relay_engine::registry::{self, HeartbeatReport};
use relay_engine::scheduler::{self, CronValidation, SchedulerLocks, TickSummary};
use relay_engine::skill as skill_engine;
use relay_storage::{StorageError, Store};
use relay_wire::{observations as wire_observations, schedules as wire_schedules, skills as wire_skills, tasks as wire_tasks, workers as wire_workers};
use std::sync::Arc;

/// Holds the dependencies every kernel operation needs: durable state, the
/// dispatch bus, and time. Generic over [`Clock`] so tests can wire in
/// [`relay_core::FakeClock`] instead of wall-clock time.
pub struct Kernel<C: Clock = SystemClock> {
    pub store: Arc<dyn Store>,
    pub bus: Arc<dyn Bus>,
    pub clock: C,
    pub claim_lease_ms: u64,
}

impl<C: Clock> Kernel<C> {
    pub fn new(store: Arc<dyn Store>, bus: Arc<dyn Bus>, clock: C, claim_lease_ms: u64) -> Self {
        Self { store, bus, clock, claim_lease_ms }
    }

    fn now_ms(&self) -> u64 {
        self.clock.epoch_ms()
    }

    // ---- workers ----

    pub async fn claim_workers(
        &self,
        workspace_id: &WorkspaceId,
        account_id: &relay_core::AccountId,
        request: ClaimRequest,
    ) -> EngineResult<ClaimResult> {
        let now_ms = self.now_ms();
        claim::claim(
            self.store.as_ref(),
            self.bus.as_ref(),
            workspace_id,
            account_id,
            self.claim_lease_ms,
            now_ms,
            request,
        )
        .await
    }

    /// `GET /workers/mine?status=...`: the reference store only indexes
    /// workers by workspace, so the account/status filters are applied here.
    pub async fn list_workers(
        &self,
        workspace_id: &WorkspaceId,
        account_id: Option<&relay_core::AccountId>,
        status: Option<WorkerStatus>,
    ) -> EngineResult<Vec<Worker>> {
        let workers = self.store.list_workers(workspace_id).await?;
        Ok(workers
            .into_iter()
            .filter(|w| account_id.is_none_or(|a| &w.account_id == a))
            .filter(|w| status.is_none_or(|s| w.status == s))
            .collect())
    }

    pub async fn active_runners(&self, workspace_id: &WorkspaceId) -> EngineResult<Vec<Runner>> {
        registry::active_runners(self.store.as_ref(), workspace_id, self.now_ms()).await
    }

    pub async fn heartbeat_runner(&self, report: HeartbeatReport) -> EngineResult<Runner> {
        registry::heartbeat(self.store.as_ref(), report, self.now_ms()).await
    }

    pub async fn get_worker(&self, worker_id: &WorkerId) -> EngineResult<Worker> {
        Ok(self.store.get_worker(worker_id).await?)
    }

    /// `PATCH /workers/{id}`. `status: Some(Completed)` runs the output gate
    /// and cascades to the owning task and its dependents; `status:
    /// Some(Failed)` fails the task too. A `status: Some(Running)` patch
    /// against a terminal worker reactivates it and reclaims its task; any
    /// other patch against a terminal worker is rejected with `Conflict`.
    /// Otherwise a plain progress update, promoting `starting -> running`
    /// (and its task `assigned -> running`) on the worker's first heartbeat
    /// PATCH after `starting`.
    pub async fn patch_worker(
        &self,
        worker_id: &WorkerId,
        patch: WorkerPatch,
        task_result: Option<TaskResult>,
        now_ms: u64,
    ) -> EngineResult<Worker> {
        let current = self.store.get_worker(worker_id).await?;
        match patch.status {
            Some(WorkerStatus::Completed) => {
                self.complete_worker(worker_id, task_result.unwrap_or_default(), now_ms).await
            }
            Some(WorkerStatus::Failed) => self.fail_worker(worker_id, patch, now_ms).await,
            Some(WorkerStatus::Running) if current.status.is_terminal() => {
                self.reactivate_worker(&current, now_ms).await
            }
            _ if current.status.is_terminal() => Err(EngineError::Kernel(KernelError::conflict(
                "worker is terminal; only a reactivation (status: running) is accepted",
            ))),
            _ => {
                if current.status == WorkerStatus::Starting {
                    self.store.promote_worker_running(worker_id, now_ms).await?;
                    let task = self.store.get_task(&current.task_id).await?;
                    if task.status == relay_core::TaskStatus::Assigned {
                        self.store.mark_task_running(&task.id, now_ms).await?;
                    }
                }
                let worker = self.store.patch_worker(worker_id, patch, now_ms).await?;
                publish_best_effort(
                    self.bus.as_ref(),
                    Channel::Worker(worker.id.clone()),
                    Event::WorkerProgress { worker: worker.clone() },
                )
                .await;
                Ok(worker)
            }
        }
    }

    async fn reactivate_worker(&self, current: &Worker, now_ms: u64) -> EngineResult<Worker> {
        let worker = self.store.reactivate_worker(&current.id, now_ms).await?;
        self.store.reactivate_task(&current.task_id, &current.id, now_ms).await?;

        tracing::info!(worker_id = %worker.id, task_id = %current.task_id, "worker reactivated");
        publish_best_effort(
            self.bus.as_ref(),
            Channel::Worker(worker.id.clone()),
            Event::WorkerStarted { worker: worker.clone() },
        )
        .await;
        Ok(worker)
    }

    async fn complete_worker(
        &self,
        worker_id: &WorkerId,
        task_result: TaskResult,
        now_ms: u64,
    ) -> EngineResult<Worker> {
        let worker = self.store.get_worker(worker_id).await?;
        let task = self.store.get_task(&worker.task_id).await?;
        gate::check(self.store.as_ref(), task.output_requirement, &task.workspace_id, worker_id, &task_result)
            .await?;

        let worker = self.store.complete_worker(worker_id, now_ms).await?;
        let task = self.store.complete_task(&task.id, task_result, now_ms).await?;
        let unblocked = self.store.unblock_dependents(&task.id, now_ms).await?;

        tracing::info!(worker_id = %worker.id, task_id = %task.id, "worker completed");
        let channel = Channel::Workspace(worker.workspace_id.clone());
        publish_best_effort(self.bus.as_ref(), channel.clone(), Event::WorkerCompleted { worker: worker.clone() })
            .await;
        for unblocked_task in unblocked {
            publish_best_effort(self.bus.as_ref(), channel.clone(), Event::TaskUnblocked { task: unblocked_task })
                .await;
        }
        Ok(worker)
    }

    async fn fail_worker(&self, worker_id: &WorkerId, patch: WorkerPatch, now_ms: u64) -> EngineResult<Worker> {
        let reason =
            patch.error.clone().into_option().flatten().unwrap_or_else(|| "worker reported failure".to_string());
        let worker = self.store.fail_worker(worker_id, reason, now_ms).await?;
        let task = self.store.fail_task(&worker.task_id, now_ms).await?;

        tracing::info!(worker_id = %worker.id, task_id = %task.id, "worker failed");
        publish_best_effort(
            self.bus.as_ref(),
            Channel::Workspace(worker.workspace_id.clone()),
            Event::WorkerFailed { worker: worker.clone() },
        )
        .await;
        Ok(worker)
    }

    pub async fn sweep_stale_workers(&self, now_ms: u64) -> EngineResult<Vec<Worker>> {
        reassign::sweep_stale_workers(self.store.as_ref(), self.bus.as_ref(), now_ms).await
    }

    // ---- plan approval ----

    pub async fn enter_plan_mode(
        &self,
        worker_id: &WorkerId,
        req: wire_workers::EnterPlanModeRequest,
        now_ms: u64,
    ) -> EngineResult<Worker> {
        plan::enter_plan_mode(self.store.as_ref(), worker_id, req.plan_start_message_index, now_ms).await
    }

    pub async fn exit_plan_mode(
        &self,
        worker_id: &WorkerId,
        req: wire_workers::ExitPlanModeRequest,
        now_ms: u64,
    ) -> EngineResult<Worker> {
        plan::exit_plan_mode(self.store.as_ref(), worker_id, &req.messages, req.tool_use_id, now_ms).await
    }

    /// `POST /workers/{id}/plan/respond`. Anything other than an explicit
    /// bypass/review decision is a change request; `feedback` defaults to
    /// an empty string if the caller omitted it.
    pub async fn respond_to_plan(
        &self,
        worker_id: &WorkerId,
        req: wire_workers::RespondToPlanRequest,
        now_ms: u64,
    ) -> EngineResult<Worker> {
        let response = match req.decision {
            wire_workers::PlanDecision::Bypass => PlanResponse::Bypass,
            wire_workers::PlanDecision::Review => PlanResponse::Review,
            wire_workers::PlanDecision::RequestChanges => {
                PlanResponse::RequestChanges(req.feedback.unwrap_or_default())
            }
        };
        plan::respond_to_plan(self.store.as_ref(), self.bus.as_ref(), worker_id, response, now_ms).await
    }

    // ---- artifacts ----

    pub async fn upsert_artifact(
        &self,
        worker_id: &WorkerId,
        workspace_id: &WorkspaceId,
        req: wire_workers::CreateArtifactRequest,
        now_ms: u64,
    ) -> EngineResult<Artifact> {
        artifact::upsert(
            self.store.as_ref(),
            self.bus.as_ref(),
            UpsertArtifactRequest {
                worker_id: worker_id.clone(),
                workspace_id: workspace_id.clone(),
                key: req.key,
                kind: req.kind,
                title: req.title,
                content: req.content,
                metadata: req.metadata,
            },
            now_ms,
        )
        .await
    }

    pub async fn list_artifacts(&self, workspace_id: &WorkspaceId) -> EngineResult<Vec<Artifact>> {
        Ok(self.store.list_artifacts(workspace_id).await?)
    }

    pub async fn get_artifact(&self, id: &ArtifactId) -> EngineResult<Artifact> {
        Ok(self.store.get_artifact(id).await?)
    }

    pub async fn get_artifact_by_share_token(&self, token: &str) -> EngineResult<Artifact> {
        Ok(self.store.get_artifact_by_share_token(token).await?)
    }

    // ---- tasks ----

    pub async fn create_task(
        &self,
        workspace_id: &WorkspaceId,
        req: wire_tasks::CreateTaskRequest,
        now_ms: u64,
    ) -> EngineResult<Task> {
        let mut task = Task::new(
            workspace_id.clone(),
            req.title,
            req.description,
            req.priority,
            req.blocked_by_task_ids,
            req.mode,
            req.output_requirement,
            now_ms,
        );
        task.project = req.project;
        task.output_schema = req.output_schema;
        task.context = req.context;
        Ok(self.store.insert_task(task).await?)
    }

    pub async fn get_task(&self, task_id: &TaskId) -> EngineResult<Task> {
        Ok(self.store.get_task(task_id).await?)
    }

    pub async fn list_tasks(&self, workspace_id: &WorkspaceId) -> EngineResult<Vec<Task>> {
        Ok(self.store.list_tasks(workspace_id).await?)
    }

    pub async fn patch_task(&self, task_id: &TaskId, patch: TaskPatch, now_ms: u64) -> EngineResult<Task> {
        Ok(self.store.patch_task(task_id, patch, now_ms).await?)
    }

    pub async fn delete_task(&self, task_id: &TaskId) -> EngineResult<()> {
        Ok(self.store.delete_task(task_id).await?)
    }

    /// `POST /tasks/{id}/start`: promotes the claiming worker out of
    /// `starting` and hands back its local UI URL, if it has reported one.
    pub async fn start_task(&self, task_id: &TaskId, now_ms: u64) -> EngineResult<wire_tasks::StartTaskResponse> {
        let task = self.store.get_task(task_id).await?;
        if !task.status.is_claimed() {
            return Err(EngineError::Kernel(KernelError::conflict(format!(
                "task is {} not assigned",
                task.status
            ))));
        }
        let worker_id = task
            .claimed_by
            .clone()
            .ok_or_else(|| EngineError::Kernel(KernelError::conflict("task has no claimant")))?;
        let worker = self.store.get_worker(&worker_id).await?;
        let worker = if worker.status == WorkerStatus::Starting {
            let patch = WorkerPatch { status: Some(WorkerStatus::Running), ..Default::default() };
            self.store.patch_worker(&worker_id, patch, now_ms).await?
        } else {
            worker
        };
        Ok(wire_tasks::StartTaskResponse { started: true, target_local_ui_url: worker.local_ui_url })
    }

    pub async fn reassign_task(
        &self,
        task_id: &TaskId,
        force: bool,
        is_workspace_owner: bool,
        now_ms: u64,
    ) -> EngineResult<ReassignOutcome> {
        reassign::reassign_task(
            self.store.as_ref(),
            self.bus.as_ref(),
            ReassignRequest { task_id: task_id.clone(), force, is_workspace_owner },
            now_ms,
        )
        .await
    }

    // ---- schedules ----

    pub async fn create_schedule(
        &self,
        workspace_id: &WorkspaceId,
        req: wire_schedules::CreateScheduleRequest,
        now_ms: u64,
    ) -> EngineResult<Schedule> {
        let next_run_at_ms = match scheduler::validate_cron(&req.cron_expression, &req.timezone, now_ms) {
            CronValidation::Valid { next_runs, .. } => {
                next_runs.first().map(|dt| dt.timestamp_millis().max(0) as u64)
            }
            CronValidation::Invalid { reason } => return Err(EngineError::Kernel(KernelError::invalid(reason))),
        };
        let schedule = Schedule {
            id: ScheduleId::new(),
            workspace_id: workspace_id.clone(),
            name: req.name,
            cron_expression: req.cron_expression,
            timezone: req.timezone,
            enabled: true,
            task_template: req.task_template,
            trigger: req.trigger,
            next_run_at_ms,
            max_concurrent_from_schedule: req.max_concurrent_from_schedule.unwrap_or(1),
            pause_after_failures: req.pause_after_failures.unwrap_or(5),
            consecutive_failures: 0,
            last_error: None,
            total_runs: 0,
        };
        Ok(self.store.insert_schedule(schedule).await?)
    }

    pub async fn get_schedule(&self, schedule_id: &ScheduleId) -> EngineResult<Schedule> {
        Ok(self.store.get_schedule(schedule_id).await?)
    }

    pub async fn list_schedules(&self, workspace_id: &WorkspaceId) -> EngineResult<Vec<Schedule>> {
        Ok(self.store.list_schedules(workspace_id).await?)
    }

    pub async fn patch_schedule(
        &self,
        schedule_id: &ScheduleId,
        req: wire_schedules::SchedulePatchRequest,
        now_ms: u64,
    ) -> EngineResult<Schedule> {
        let mut schedule = self.store.get_schedule(schedule_id).await?;
        if let Some(name) = req.name {
            schedule.name = name;
        }
        if let Some(cron_expression) = req.cron_expression {
            schedule.cron_expression = cron_expression;
        }
        if let Some(timezone) = req.timezone {
            schedule.timezone = timezone;
        }
        if let Some(enabled) = req.enabled {
            schedule.enabled = enabled;
        }
        if let Some(task_template) = req.task_template {
            schedule.task_template = task_template;
        }
        if let Some(max_concurrent) = req.max_concurrent_from_schedule {
            schedule.max_concurrent_from_schedule = max_concurrent;
        }
        if let Some(pause_after_failures) = req.pause_after_failures {
            schedule.pause_after_failures = pause_after_failures;
        }

        schedule.next_run_at_ms = if schedule.enabled {
            match scheduler::validate_cron(&schedule.cron_expression, &schedule.timezone, now_ms) {
                CronValidation::Valid { next_runs, .. } => {
                    next_runs.first().map(|dt| dt.timestamp_millis().max(0) as u64)
                }
                CronValidation::Invalid { reason } => {
                    return Err(EngineError::Kernel(KernelError::invalid(reason)))
                }
            }
        } else {
            None
        };

        Ok(self.store.update_schedule(schedule).await?)
    }

    pub async fn delete_schedule(&self, schedule_id: &ScheduleId) -> EngineResult<()> {
        Ok(self.store.delete_schedule(schedule_id).await?)
    }

    /// `GET .../schedules/validate`. Infallible: an unparseable expression
    /// comes back as `valid: false`, never an error.
    pub fn validate_cron(
        &self,
        query: &wire_schedules::ValidateCronQuery,
        now_ms: u64,
    ) -> wire_schedules::ValidateCronResponse {
        match scheduler::validate_cron(&query.cron, &query.timezone, now_ms) {
            CronValidation::Valid { description, next_runs } => wire_schedules::ValidateCronResponse {
                valid: true,
                description: Some(description),
                next_runs: Some(next_runs.iter().map(|dt| dt.timestamp_millis().max(0) as u64).collect()),
                reason: None,
            },
            CronValidation::Invalid { reason } => {
                wire_schedules::ValidateCronResponse { valid: false, description: None, next_runs: None, reason: Some(reason) }
            }
        }
    }

    pub async fn run_scheduler_tick(&self, locks: &SchedulerLocks, now_ms: u64) -> EngineResult<TickSummary> {
        scheduler::tick(self.store.as_ref(), self.bus.as_ref(), locks, now_ms).await
    }

    // ---- observations ----
    //
    // Observations are immutable, append-only notes (see
    // `relay_core::observation`): there is no update or delete surface here,
    // only record/search/digest/batch.

    pub async fn record_observation(
        &self,
        workspace_id: &WorkspaceId,
        req: wire_observations::CreateObservationRequest,
        now_ms: u64,
    ) -> EngineResult<Observation> {
        observation::record(
            self.store.as_ref(),
            NewObservation {
                workspace_id: workspace_id.clone(),
                kind: req.kind,
                title: req.title,
                content: req.content,
                files: req.files,
                concepts: req.concepts,
            },
            now_ms,
        )
        .await
    }

    pub async fn list_observations(&self, workspace_id: &WorkspaceId) -> EngineResult<Vec<Observation>> {
        Ok(self.store.list_observations(workspace_id).await?)
    }

    pub async fn search_observations(
        &self,
        workspace_id: &WorkspaceId,
        query: &str,
        limit: usize,
    ) -> EngineResult<Vec<Observation>> {
        observation::search(self.store.as_ref(), workspace_id, query, limit).await
    }

    pub async fn compact_digest(&self, workspace_id: &WorkspaceId) -> EngineResult<Vec<DigestGroup>> {
        observation::compact_digest(self.store.as_ref(), workspace_id).await
    }

    pub async fn batch_observations(
        &self,
        workspace_id: &WorkspaceId,
        ids: &[ObservationId],
    ) -> EngineResult<Vec<Observation>> {
        observation::batch(self.store.as_ref(), workspace_id, ids).await
    }

    // ---- skills ----

    pub async fn upsert_skill(
        &self,
        workspace_id: &WorkspaceId,
        req: wire_skills::UpsertSkillRequest,
        now_ms: u64,
    ) -> EngineResult<Skill> {
        let _ = now_ms;
        if !relay_core::skill::is_valid_slug(&req.slug) {
            return Err(EngineError::Kernel(KernelError::invalid(
                "slug must be lowercase-hyphenated, e.g. 'my-skill'",
            )));
        }
        let content_hash = relay_core::skill::content_hash(&req.content);

        let skill = match self.store.get_skill_by_slug(workspace_id, &req.slug).await {
            Ok(mut existing) => {
                existing.name = req.name;
                existing.description = req.description;
                existing.content = req.content;
                existing.content_hash = content_hash;
                existing.source = req.source;
                self.store.update_skill(existing).await?
            }
            Err(StorageError::Kernel(KernelError::NotFound { .. })) => {
                let fresh = Skill {
                    id: SkillId::new(),
                    workspace_id: workspace_id.clone(),
                    slug: req.slug,
                    name: req.name,
                    description: req.description,
                    content: req.content,
                    content_hash,
                    source: req.source,
                    origin: SkillOrigin::Manual,
                    enabled: true,
                };
                self.store.insert_skill(fresh).await?
            }
            Err(err) => return Err(err.into()),
        };
        Ok(skill)
    }

    pub async fn get_skill(&self, skill_id: &SkillId) -> EngineResult<Skill> {
        Ok(self.store.get_skill(skill_id).await?)
    }

    pub async fn list_skills(&self, workspace_id: &WorkspaceId) -> EngineResult<Vec<Skill>> {
        Ok(self.store.list_skills(workspace_id).await?)
    }

    pub async fn delete_skill(&self, skill_id: &SkillId) -> EngineResult<()> {
        Ok(self.store.delete_skill(skill_id).await?)
    }

    pub async fn install_skill(
        &self,
        workspace_id: &WorkspaceId,
        req: wire_skills::InstallSkillRequest,
        extra_allowed_prefixes: &[String],
    ) -> EngineResult<()> {
        let request = match (req.skill_id, req.skill_slug, req.installer_command) {
            (Some(skill_id), None, None) => skill_engine::InstallSkillRequest::Content { skill_id },
            (None, Some(skill_slug), Some(installer_command)) => {
                skill_engine::InstallSkillRequest::Command { skill_slug, installer_command }
            }
            _ => {
                return Err(EngineError::Kernel(KernelError::invalid(
                    "exactly one of skillId or (skillSlug + installerCommand) must be set",
                )))
            }
        };
        skill_engine::install_skill(self.store.as_ref(), self.bus.as_ref(), workspace_id, request, extra_allowed_prefixes)
            .await
    }
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
