// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace identity. A workspace is the scoping boundary for tasks,
//! schedules, observations, artifacts, and skills.

use crate::account::AccountId;

crate::define_id! {
    /// Unique identifier for a workspace.
    pub struct WorkspaceId("wsp-");
}

/// A workspace record, owned by one account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub owner_id: AccountId,
}
