// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_core::{ArtifactType, WorkerId};
use std::collections::HashMap;

fn sample(workspace_id: WorkspaceId, key: Option<&str>, content: &str) -> Artifact {
    Artifact {
        id: ArtifactId::new(),
        worker_id: WorkerId::new(),
        workspace_id,
        key: key.map(String::from),
        kind: ArtifactType::Report,
        title: "report".into(),
        content: content.into(),
        metadata: HashMap::new(),
        share_token: format!("tok-{content}"),
        created_at_ms: 0,
        updated_at_ms: 0,
    }
}

#[test]
fn upsert_with_same_key_replaces_in_place() {
    let mut state = State::default();
    let workspace_id = WorkspaceId::new();
    let first = upsert(&mut state, sample(workspace_id.clone(), Some("summary"), "v1")).unwrap();
    let second = upsert(&mut state, sample(workspace_id.clone(), Some("summary"), "v2")).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(list(&state, &workspace_id).unwrap().len(), 1);
    assert_eq!(get(&state, &second.id).unwrap().content, "v2");
}

#[test]
fn upsert_without_key_always_inserts() {
    let mut state = State::default();
    let workspace_id = WorkspaceId::new();
    upsert(&mut state, sample(workspace_id.clone(), None, "v1")).unwrap();
    upsert(&mut state, sample(workspace_id.clone(), None, "v2")).unwrap();
    assert_eq!(list(&state, &workspace_id).unwrap().len(), 2);
}

#[test]
fn lookup_by_share_token() {
    let mut state = State::default();
    let workspace_id = WorkspaceId::new();
    let artifact = upsert(&mut state, sample(workspace_id, Some("x"), "v1")).unwrap();
    let found = get_by_share_token(&state, &artifact.share_token).unwrap();
    assert_eq!(found.id, artifact.id);
    assert!(get_by_share_token(&state, "missing").is_err());
}
