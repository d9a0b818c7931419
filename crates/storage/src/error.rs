// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage-layer error wrapping.
//!
//! The reference store never sees a real transient fault (no socket, no
//! pool), but the trait surface leaves room for a future Postgres-backed
//! store to report one without changing callers in `relay-engine`.

use relay_core::KernelError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    /// A kernel-visible error: not found, conflict, invalid input, etc.
    /// Propagates to the API boundary unchanged.
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// A connection or pool fault that a retry might resolve. `relay-engine`
    /// never constructs this variant itself; it only decides whether to retry.
    #[error("transient storage error: {0}")]
    Transient(String),
}

impl StorageError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Transient(_))
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Retry an operation that may fail transiently, with linear backoff.
///
/// Grounded on the at-least-once delivery assumption already documented on
/// [`relay_core::Event`]: storage operations are expected to be safe to
/// retry because the engine layer only ever calls idempotent mutations
/// (predicated updates, upserts) through this trait.
pub async fn with_retry<F, Fut, T>(attempts: u32, mut op: F) -> StorageResult<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = StorageResult<T>>,
{
    let mut last_err = None;
    for attempt in 0..attempts.max(1) {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt + 1 < attempts => {
                tracing::warn!(attempt, error = %err, "retrying transient storage error");
                last_err = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(last_err.unwrap_or_else(|| StorageError::Transient("retry loop exhausted".into())))
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
