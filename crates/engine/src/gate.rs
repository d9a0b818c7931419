// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output-Completion Gate: decides whether a task's reported result is
//! sufficient to close it out as `completed`. A failed gate is a 400 at the
//! HTTP boundary; the task and worker are left exactly where they were.

use relay_core::{KernelError, OutputRequirement, TaskResult, WorkerId, WorkspaceId};
use relay_storage::Store;

/// Check the gate for `output_requirement` against a candidate result. Needs
/// the store to look up whether the worker produced any artifact, since
/// `artifact_required` accepts either a PR or an artifact.
pub async fn check(
    store: &dyn Store,
    output_requirement: OutputRequirement,
    workspace_id: &WorkspaceId,
    worker_id: &WorkerId,
    result: &TaskResult,
) -> Result<(), KernelError> {
    match output_requirement {
        OutputRequirement::None => Ok(()),
        OutputRequirement::PrRequired => {
            if result.pr_url.is_some() {
                Ok(())
            } else {
                Err(KernelError::OutputGateFailed { hint: "create_pr".into() })
            }
        }
        OutputRequirement::ArtifactRequired => {
            if result.pr_url.is_some() || has_artifact(store, workspace_id, worker_id).await? {
                Ok(())
            } else {
                Err(KernelError::OutputGateFailed { hint: "create_pr or create_artifact".into() })
            }
        }
        OutputRequirement::Auto => {
            if result.commits.is_empty() {
                return Ok(());
            }
            if result.pr_url.is_some() || has_artifact(store, workspace_id, worker_id).await? {
                Ok(())
            } else {
                Err(KernelError::OutputGateFailed { hint: "create_pr or create_artifact".into() })
            }
        }
    }
}

async fn has_artifact(
    store: &dyn Store,
    workspace_id: &WorkspaceId,
    worker_id: &WorkerId,
) -> Result<bool, KernelError> {
    let artifacts = store.list_artifacts(workspace_id).await.map_err(|e| match e {
        relay_storage::StorageError::Kernel(k) => k,
        relay_storage::StorageError::Transient(msg) => {
            KernelError::Aborted { reason: format!("storage unavailable: {msg}") }
        }
    })?;
    Ok(artifacts.iter().any(|a| &a.worker_id == worker_id))
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
