// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account and workspace lookups, plus the active-worker count the Claim
//! Engine's admission gate reads.

use super::state::State;
use crate::error::{StorageError, StorageResult};
use relay_core::{Account, AccountId, KernelError, Workspace, WorkspaceId};

pub(crate) fn get_account(state: &State, id: &AccountId) -> StorageResult<Account> {
    state.accounts.get(id).cloned().ok_or_else(|| StorageError::Kernel(KernelError::not_found("account")))
}

pub(crate) fn get_workspace(state: &State, id: &WorkspaceId) -> StorageResult<Workspace> {
    state
        .workspaces
        .get(id)
        .cloned()
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("workspace")))
}

pub(crate) fn count_active_workers(state: &State, account_id: &AccountId) -> StorageResult<u32> {
    Ok(state
        .workers
        .values()
        .filter(|w| &w.account_id == account_id && w.status.is_active())
        .count() as u32)
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;
