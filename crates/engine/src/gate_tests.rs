// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_core::{Artifact, ArtifactId, ArtifactType};
use relay_storage::MemoryStore;
use std::collections::HashMap;

fn result_with_commits(commits: usize) -> TaskResult {
    TaskResult { commits: vec!["deadbeef".into(); commits], ..Default::default() }
}

#[tokio::test]
async fn none_always_passes() {
    let store = MemoryStore::new();
    let workspace_id = WorkspaceId::new();
    let worker_id = WorkerId::new();
    assert!(check(&store, OutputRequirement::None, &workspace_id, &worker_id, &result_with_commits(5))
        .await
        .is_ok());
}

#[tokio::test]
async fn pr_required_needs_a_pr_url() {
    let store = MemoryStore::new();
    let workspace_id = WorkspaceId::new();
    let worker_id = WorkerId::new();
    let err = check(&store, OutputRequirement::PrRequired, &workspace_id, &worker_id, &TaskResult::default())
        .await
        .unwrap_err();
    assert!(matches!(err, KernelError::OutputGateFailed { .. }));

    let result = TaskResult { pr_url: Some("https://example/pr/1".into()), ..Default::default() };
    assert!(check(&store, OutputRequirement::PrRequired, &workspace_id, &worker_id, &result).await.is_ok());
}

#[tokio::test]
async fn auto_passes_with_zero_commits_even_without_pr() {
    let store = MemoryStore::new();
    let workspace_id = WorkspaceId::new();
    let worker_id = WorkerId::new();
    assert!(check(&store, OutputRequirement::Auto, &workspace_id, &worker_id, &TaskResult::default())
        .await
        .is_ok());
}

#[tokio::test]
async fn auto_requires_pr_or_artifact_once_commits_exist() {
    let store = MemoryStore::new();
    let workspace_id = WorkspaceId::new();
    let worker_id = WorkerId::new();
    let result = result_with_commits(2);

    let err = check(&store, OutputRequirement::Auto, &workspace_id, &worker_id, &result).await.unwrap_err();
    assert!(matches!(err, KernelError::OutputGateFailed { .. }));

    store
        .upsert_artifact(Artifact {
            id: ArtifactId::new(),
            worker_id: worker_id.clone(),
            workspace_id: workspace_id.clone(),
            key: None,
            kind: ArtifactType::Report,
            title: "summary".into(),
            content: "done".into(),
            metadata: HashMap::new(),
            share_token: String::new(),
            created_at_ms: 0,
            updated_at_ms: 0,
        })
        .await
        .unwrap();

    assert!(check(&store, OutputRequirement::Auto, &workspace_id, &worker_id, &result).await.is_ok());
}

#[tokio::test]
async fn artifact_required_accepts_pr_in_lieu_of_artifact() {
    let store = MemoryStore::new();
    let workspace_id = WorkspaceId::new();
    let worker_id = WorkerId::new();
    let result = TaskResult { pr_url: Some("https://example/pr/2".into()), ..Default::default() };
    assert!(
        check(&store, OutputRequirement::ArtifactRequired, &workspace_id, &worker_id, &result).await.is_ok()
    );
}
