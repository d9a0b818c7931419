// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account identity and the per-account concurrency limit the Claim Engine
//! admits against.

crate::define_id! {
    /// Unique identifier for an owning agent account.
    pub struct AccountId("acc-");
}

/// The only admission gate the Claim Engine enforces: an account may not
/// have more than `max_concurrent_workers` workers simultaneously active.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub max_concurrent_workers: u32,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: AccountId::new(), name: name.into(), max_concurrent_workers: 5 }
    }
}
