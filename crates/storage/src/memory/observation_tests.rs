// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_core::ObservationType;

fn sample(workspace_id: WorkspaceId, title: &str, created_at_ms: u64) -> Observation {
    Observation {
        id: relay_core::ObservationId::new(),
        workspace_id,
        kind: ObservationType::Discovery,
        title: title.into(),
        content: "some content".into(),
        files: vec![],
        concepts: vec!["rust".into()],
        created_at_ms,
    }
}

#[test]
fn search_returns_newest_first_and_respects_limit() {
    let mut state = State::default();
    let workspace_id = WorkspaceId::new();
    record(&mut state, sample(workspace_id.clone(), "alpha finding", 1)).unwrap();
    record(&mut state, sample(workspace_id.clone(), "beta finding", 2)).unwrap();
    record(&mut state, sample(workspace_id.clone(), "gamma finding", 3)).unwrap();

    let hits = search(&state, &workspace_id, "finding", 2).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "gamma finding");
    assert_eq!(hits[1].title, "beta finding");
}

#[test]
fn search_scopes_to_workspace() {
    let mut state = State::default();
    let workspace_a = WorkspaceId::new();
    let workspace_b = WorkspaceId::new();
    record(&mut state, sample(workspace_a.clone(), "alpha", 1)).unwrap();
    record(&mut state, sample(workspace_b, "alpha", 1)).unwrap();

    assert_eq!(search(&state, &workspace_a, "", 10).unwrap().len(), 1);
}
