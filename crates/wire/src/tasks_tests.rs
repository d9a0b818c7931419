// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn create_task_request_defaults_mode_and_output_requirement() {
    let json = serde_json::json!({"title": "Ship it", "description": "do the thing"});
    let request: CreateTaskRequest = serde_json::from_value(json).unwrap();
    assert_eq!(request.mode, TaskMode::Execute);
    assert_eq!(request.output_requirement, OutputRequirement::Auto);
    assert_eq!(request.priority, 0);
}

#[test]
fn reassign_query_defaults_force_to_false() {
    let query: ReassignQuery = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(!query.force);
}

#[test]
fn reassign_response_omits_absent_optional_fields() {
    let response = ReassignResponse { reassigned: true, reason: None, can_takeover: None };
    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("reason").is_none());
    assert!(json.get("canTakeover").is_none());
}
