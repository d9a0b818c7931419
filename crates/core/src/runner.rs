// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner identity: a registered agent host tracked by heartbeat.

use crate::account::AccountId;
use crate::workspace::WorkspaceId;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a registered runner.
    pub struct RunnerId("run-");
}

/// A runner is considered live iff `now - last_heartbeat_at <= LIVENESS_WINDOW_MS`.
pub const LIVENESS_WINDOW_MS: u64 = 90_000;

/// A registered agent host (the source repo calls this a "LocalUi").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runner {
    pub id: RunnerId,
    pub account_id: AccountId,
    pub url: String,
    pub workspace_ids: Vec<WorkspaceId>,
    pub capacity: u32,
    pub active_workers: u32,
    pub last_heartbeat_at_ms: u64,
    pub version: String,
}

impl Runner {
    pub fn is_active(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_heartbeat_at_ms) <= LIVENESS_WINDOW_MS
    }

    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.active_workers)
    }

    pub fn advertises(&self, workspace_id: &WorkspaceId) -> bool {
        self.workspace_ids.contains(workspace_id)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
