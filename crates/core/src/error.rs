// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The kernel-wide error taxonomy.
//!
//! Every fallible kernel operation returns `Result<T, KernelError>`. Each
//! variant carries the structured payload an HTTP layer would need to
//! render a response, per the error table in the coordination spec.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum KernelError {
    #[error("unauthorized")]
    #[serde(rename = "unauthorized")]
    Unauthorized,

    #[error("forbidden: {reason}")]
    #[serde(rename = "forbidden")]
    Forbidden { reason: String },

    #[error("not found: {entity}")]
    #[serde(rename = "not_found")]
    NotFound { entity: String },

    #[error("conflict: {reason}")]
    #[serde(rename = "conflict")]
    Conflict { reason: String },

    #[error("capacity exceeded ({current}/{limit})")]
    #[serde(rename = "capacity_exceeded")]
    CapacityExceeded { current: u32, limit: u32 },

    #[error("output gate failed: {hint}")]
    #[serde(rename = "output_gate_failed")]
    OutputGateFailed { hint: String },

    #[error("invalid: {reason}")]
    #[serde(rename = "invalid")]
    Invalid { reason: String },

    #[error("aborted: {reason}")]
    #[serde(rename = "aborted")]
    Aborted { reason: String },
}

impl KernelError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound { entity: entity.into() }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict { reason: reason.into() }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid { reason: reason.into() }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden { reason: reason.into() }
    }

    /// HTTP status an external router would map this to. The kernel never
    /// touches HTTP itself; this is a documented convenience for callers.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::CapacityExceeded { .. } => 429,
            Self::OutputGateFailed { .. } => 400,
            Self::Invalid { .. } => 400,
            Self::Aborted { .. } => 400,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
