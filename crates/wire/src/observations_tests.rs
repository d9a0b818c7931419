// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn create_observation_request_renames_kind_to_type() {
    let request = CreateObservationRequest {
        kind: ObservationType::Gotcha,
        title: "flaky test".into(),
        content: "retries under load".into(),
        files: vec![],
        concepts: vec![],
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["type"], serde_json::json!("gotcha"));
}

#[test]
fn search_query_defaults_to_empty_string() {
    let query: SearchQuery = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(query.query, "");
}

#[test]
fn batch_request_carries_explicit_ids() {
    let ids = vec![ObservationId::new(), ObservationId::new()];
    let request = BatchObservationsRequest { ids: ids.clone() };
    let json = serde_json::to_string(&request).unwrap();
    let parsed: BatchObservationsRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.ids, ids);
}
