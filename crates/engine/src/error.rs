// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error glue between `relay-storage` and the kernel-wide taxonomy.
//!
//! Every operation in this crate resolves to a [`relay_core::KernelError`] at
//! its public boundary; a transient storage fault that survives
//! [`relay_storage::with_retry`] is reported as [`KernelError::Aborted`]
//! rather than inventing a new variant the HTTP layer would need to learn.

use relay_core::KernelError;
use relay_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("bus publish failed: {0}")]
    Bus(String),
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Kernel(k) => Self::Kernel(k),
            StorageError::Transient(msg) => {
                Self::Kernel(KernelError::Aborted { reason: format!("storage unavailable: {msg}") })
            }
        }
    }
}

impl From<EngineError> for KernelError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Kernel(k) => k,
            EngineError::Bus(msg) => KernelError::Aborted { reason: msg },
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
