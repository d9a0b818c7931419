// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan Approval Subsystem: a worker can pause in `planning` mode, present a
//! plan for review, and either resume on approval or start a fresh session
//! on a change request.
//!
//! Writing the rendered plan to the collaborator-facing `~/.buildd/plans/`
//! directory is a `relay-daemon` concern; this module only owns the worker
//! state transition and the bus events.

use crate::dispatch::{publish_best_effort, Bus};
use crate::error::{EngineError, EngineResult};
use relay_core::{
    Channel, ClearableField, Event, KernelError, Milestone, SessionMessage, WaitingFor, WaitingKind,
    Worker, WorkerId, WorkerPatch,
};
use relay_storage::Store;

/// Concatenate assistant text at transcript indices strictly greater than
/// `plan_start_index`, verbatim and in order, joined with `\n`. Tool-use
/// entries and anything else (the initial system message, the final
/// result) never contribute, even when they fall inside that range.
pub fn extract_plan_content(messages: &[SessionMessage], plan_start_index: u32) -> String {
    messages
        .iter()
        .skip(plan_start_index as usize + 1)
        .filter_map(|message| match message {
            SessionMessage::AssistantText { text } => Some(text.as_str()),
            SessionMessage::ToolUse { .. } | SessionMessage::Other => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `EnterPlanMode`: capture the message offset the plan will be built from.
pub async fn enter_plan_mode(
    store: &dyn Store,
    worker_id: &WorkerId,
    plan_start_message_index: u32,
    now_ms: u64,
) -> EngineResult<Worker> {
    let patch = WorkerPatch {
        plan_start_message_index: ClearableField::Set(plan_start_message_index),
        ..Default::default()
    };
    Ok(store.patch_worker(worker_id, patch, now_ms).await?)
}

/// `ExitPlanMode`: the agent has a plan ready. Extracts `planContent` from
/// the transcript since `planStartMessageIndex` (§4.6 step 1), transitions
/// the worker to `waiting_input` with a `plan_approval` prompt, and records
/// the `plan_awaiting` milestone.
pub async fn exit_plan_mode(
    store: &dyn Store,
    worker_id: &WorkerId,
    messages: &[SessionMessage],
    tool_use_id: String,
    now_ms: u64,
) -> EngineResult<Worker> {
    let mut worker = store.get_worker(worker_id).await?;
    let plan_start_index = worker.plan_start_message_index.unwrap_or(0);
    let plan_content = extract_plan_content(messages, plan_start_index);
    let waiting_for = WaitingFor {
        kind: WaitingKind::PlanApproval,
        prompt: plan_content.clone(),
        tool_use_id,
        options: vec!["bypass".into(), "review".into(), "request_changes".into()],
    };
    worker.enter_waiting(waiting_for.clone(), now_ms);

    let patch = WorkerPatch {
        status: Some(worker.status),
        waiting_for: ClearableField::Set(waiting_for),
        plan_content: ClearableField::Set(plan_content),
        new_milestones: vec![Milestone {
            kind: "plan_awaiting".into(),
            label: "Plan ready for review".into(),
            ts_ms: now_ms,
            progress: None,
            tool_count: None,
        }],
        ..Default::default()
    };
    Ok(store.patch_worker(worker_id, patch, now_ms).await?)
}

/// How the human (or a policy) responded to a plan pending approval.
pub enum PlanResponse {
    /// Resume with the agent's permission prompts bypassed.
    Bypass,
    /// Resume normally, permission prompts intact.
    Review,
    /// Free text other than bypass/review: a change request. Starts a new
    /// session (`session_generation` increments).
    RequestChanges(String),
}

/// Apply a plan-approval response. Fails with `Conflict` if the worker is
/// not currently `waiting_input` on a `plan_approval` prompt.
pub async fn respond_to_plan(
    store: &dyn Store,
    bus: &dyn Bus,
    worker_id: &WorkerId,
    response: PlanResponse,
    now_ms: u64,
) -> EngineResult<Worker> {
    let mut worker = store.get_worker(worker_id).await?;
    let awaiting_plan =
        matches!(worker.waiting_for.as_ref(), Some(w) if w.kind == WaitingKind::PlanApproval);
    if !awaiting_plan {
        return Err(EngineError::Kernel(KernelError::conflict(
            "worker is not awaiting plan approval",
        )));
    }

    let channel = Channel::Worker(worker_id.clone());
    match response {
        PlanResponse::Bypass | PlanResponse::Review => {
            let bypass_permissions = matches!(response, PlanResponse::Bypass);
            worker.resume_running(now_ms);
            let patch = WorkerPatch {
                status: Some(worker.status),
                waiting_for: ClearableField::Clear,
                ..Default::default()
            };
            let worker = store.patch_worker(worker_id, patch, now_ms).await?;
            tracing::info!(worker_id = %worker.id, bypass_permissions, "plan approved");
            publish_best_effort(
                bus,
                channel,
                Event::PlanApproved { worker: worker.clone(), bypass_permissions },
            )
            .await;
            Ok(worker)
        }
        PlanResponse::RequestChanges(feedback) => {
            worker.reactivate(now_ms);
            let patch = WorkerPatch {
                status: Some(worker.status),
                waiting_for: ClearableField::Clear,
                current_action: Some("Revising plan...".into()),
                ..Default::default()
            };
            let worker = store.patch_worker(worker_id, patch, now_ms).await?;
            tracing::info!(worker_id = %worker.id, generation = worker.session_generation, "plan revision requested");
            publish_best_effort(
                bus,
                channel,
                Event::PlanRevision { worker: worker.clone(), feedback },
            )
            .await;
            Ok(worker)
        }
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
