// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_core::test_support::{new_account, WorkerBuilder};
use relay_core::WorkerStatus;

#[test]
fn counts_only_active_statuses() {
    let mut state = State::default();
    let account = new_account(5);
    let account_id = account.id.clone();
    state.accounts.insert(account_id.clone(), account);

    let running = WorkerBuilder::default().account_id(account_id.clone()).status(WorkerStatus::Running).build();
    let done =
        WorkerBuilder::default().account_id(account_id.clone()).status(WorkerStatus::Completed).build();
    state.workers.insert(running.id.clone(), running);
    state.workers.insert(done.id.clone(), done);

    assert_eq!(count_active_workers(&state, &account_id).unwrap(), 1);
}

#[test]
fn missing_account_is_not_found() {
    let state = State::default();
    assert!(get_account(&state, &relay_core::AccountId::new()).is_err());
}
