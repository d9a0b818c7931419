// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error envelope: `{error}` at minimum, plus whichever of `code`/`hint`/
//! `current`/`limit` the underlying `KernelError` variant carries.

use relay_core::KernelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl From<&KernelError> for ErrorBody {
    fn from(err: &KernelError) -> Self {
        let tagged = serde_json::to_value(err).unwrap_or_else(|_| serde_json::Value::Null);
        let field = |name: &str| tagged.get(name).cloned();
        Self {
            error: err.to_string(),
            code: field("code").and_then(|v| v.as_str().map(str::to_string)),
            hint: field("hint").and_then(|v| v.as_str().map(str::to_string)),
            current: field("current").and_then(|v| v.as_u64()).map(|v| v as u32),
            limit: field("limit").and_then(|v| v.as_u64()).map(|v| v as u32),
        }
    }
}

impl From<KernelError> for ErrorBody {
    fn from(err: KernelError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
