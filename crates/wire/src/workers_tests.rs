// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_core::{AccountId, SessionMessage, TaskId, Worker};

#[test]
fn claim_request_without_task_id_round_trips_as_absent() {
    let request = ClaimRequest::default();
    let json = serde_json::to_string(&request).unwrap();
    assert_eq!(json, "{}");
    let parsed: ClaimRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, request);
}

#[test]
fn claim_request_with_task_id_uses_camel_case() {
    let task_id = TaskId::new();
    let request = ClaimRequest { task_id: Some(task_id.clone()) };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["taskId"], serde_json::json!(task_id.to_string()));
}

#[test]
fn worker_update_response_flattens_worker_fields() {
    let worker = Worker::new(AccountId::new(), TaskId::new(), relay_core::WorkspaceId::new(), 0);
    let worker_id = worker.id.clone();
    let response = WorkerUpdateResponse { worker, instructions: Some("stand by".into()) };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["id"], serde_json::json!(worker_id.to_string()));
    assert_eq!(json["instructions"], serde_json::json!("stand by"));
}

#[test]
fn worker_update_response_omits_absent_instructions() {
    let worker = Worker::new(AccountId::new(), TaskId::new(), relay_core::WorkspaceId::new(), 0);
    let response = WorkerUpdateResponse { worker, instructions: None };
    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("instructions").is_none());
}

#[test]
fn respond_to_plan_request_omits_absent_feedback() {
    let request = RespondToPlanRequest { decision: PlanDecision::Bypass, feedback: None };
    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("feedback").is_none());
    assert_eq!(json["decision"], serde_json::json!("bypass"));
}

#[test]
fn exit_plan_mode_request_round_trips_the_transcript() {
    let request = ExitPlanModeRequest {
        messages: vec![
            SessionMessage::Other,
            SessionMessage::ToolUse { name: "EnterPlanMode".into() },
            SessionMessage::AssistantText { text: "## Plan\n1. A".into() },
        ],
        tool_use_id: "tu_1".into(),
    };
    let json = serde_json::to_string(&request).unwrap();
    let parsed: ExitPlanModeRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, request);
}

#[test]
fn respond_to_plan_request_with_changes_round_trips() {
    let request = RespondToPlanRequest {
        decision: PlanDecision::RequestChanges,
        feedback: Some("use a different approach".into()),
    };
    let json = serde_json::to_string(&request).unwrap();
    let parsed: RespondToPlanRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, request);
}
