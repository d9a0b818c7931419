// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::dispatch::InMemoryBus;
use relay_core::test_support::WorkerBuilder;
use relay_core::{SessionMessage, WorkerStatus};
use relay_storage::MemoryStore;

async fn seeded_worker(store: &MemoryStore, status: WorkerStatus) -> WorkerId {
    let worker = WorkerBuilder::default().status(status).build();
    let id = worker.id.clone();
    store.insert_worker(worker).await.unwrap();
    id
}

fn text(s: &str) -> SessionMessage {
    SessionMessage::AssistantText { text: s.into() }
}

fn tool(name: &str) -> SessionMessage {
    SessionMessage::ToolUse { name: name.into() }
}

/// A single assistant-text message at index 1, preceded by an unrelated
/// entry at index 0 — `plan_start_message_index` defaults to 0.
fn single_message_transcript(s: &str) -> Vec<SessionMessage> {
    vec![SessionMessage::Other, text(s)]
}

#[test]
fn extract_plan_content_matches_the_plan_approval_flow_scenario() {
    let messages = vec![
        SessionMessage::Other,
        text("Analyzing..."),
        tool("EnterPlanMode"),
        text("## Plan\n1. A"),
        text("2. B"),
        tool("ExitPlanMode"),
        SessionMessage::Other,
    ];
    assert_eq!(extract_plan_content(&messages, 2), "## Plan\n1. A\n2. B");
}

#[test]
fn extract_plan_content_excludes_messages_at_or_before_the_start_index() {
    let messages = vec![text("before"), text("also before"), text("after")];
    assert_eq!(extract_plan_content(&messages, 1), "after");
}

#[test]
fn extract_plan_content_is_empty_when_nothing_follows_the_start_index() {
    let messages = vec![text("before"), tool("EnterPlanMode")];
    assert_eq!(extract_plan_content(&messages, 1), "");
}

#[tokio::test]
async fn enter_plan_mode_records_message_index() {
    let store = MemoryStore::new();
    let worker_id = seeded_worker(&store, WorkerStatus::Running).await;
    let updated = enter_plan_mode(&store, &worker_id, 12, 1_000).await.unwrap();
    assert_eq!(updated.plan_start_message_index, Some(12));
}

#[tokio::test]
async fn exit_plan_mode_moves_worker_to_waiting_input() {
    let store = MemoryStore::new();
    let worker_id = seeded_worker(&store, WorkerStatus::Running).await;
    let messages = single_message_transcript("do the thing");
    let updated = exit_plan_mode(&store, &worker_id, &messages, "tool-1".into(), 2_000).await.unwrap();
    assert_eq!(updated.status, WorkerStatus::WaitingInput);
    assert_eq!(updated.plan_content.as_deref(), Some("do the thing"));
    assert!(updated.waiting_for.is_some());
    assert_eq!(updated.milestones.last().unwrap().kind, "plan_awaiting");
}

#[tokio::test]
async fn respond_bypass_resumes_running_and_emits_event() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let worker_id = seeded_worker(&store, WorkerStatus::Running).await;
    let messages = single_message_transcript("plan");
    exit_plan_mode(&store, &worker_id, &messages, "tool-1".into(), 1_000).await.unwrap();

    let updated = respond_to_plan(&store, &bus, &worker_id, PlanResponse::Bypass, 2_000).await.unwrap();
    assert_eq!(updated.status, WorkerStatus::Running);
    assert!(updated.waiting_for.is_none());
    assert_eq!(bus.drain().len(), 1);
}

#[tokio::test]
async fn respond_request_changes_starts_a_new_session() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let worker_id = seeded_worker(&store, WorkerStatus::Running).await;
    let messages = single_message_transcript("plan");
    exit_plan_mode(&store, &worker_id, &messages, "tool-1".into(), 1_000).await.unwrap();

    let updated = respond_to_plan(
        &store,
        &bus,
        &worker_id,
        PlanResponse::RequestChanges("add tests".into()),
        2_000,
    )
    .await
    .unwrap();
    assert_eq!(updated.status, WorkerStatus::Running);
    assert_eq!(updated.session_generation, 2);
    assert_eq!(updated.current_action.as_deref(), Some("Revising plan..."));
}

#[tokio::test]
async fn respond_rejects_worker_not_awaiting_plan() {
    let store = MemoryStore::new();
    let bus = InMemoryBus::new();
    let worker_id = seeded_worker(&store, WorkerStatus::Running).await;

    let err = respond_to_plan(&store, &bus, &worker_id, PlanResponse::Bypass, 2_000).await.unwrap_err();
    assert!(matches!(err, EngineError::Kernel(KernelError::Conflict { .. })));
}
