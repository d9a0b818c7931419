// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/workspaces/{id}/skills*` request/response bodies.

use relay_core::{Skill, SkillId};
use serde::{Deserialize, Serialize};

/// `POST /workspaces/{id}/skills`: upserts by `(workspace_id, slug)`.
/// `content_hash` and `origin` are computed kernel-side, not accepted here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSkillRequest {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillResponse {
    pub skill: Skill,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillsResponse {
    pub skills: Vec<Skill>,
}

/// `POST /workspaces/{id}/skills/install`. Exactly one push mode per
/// request; the kernel rejects a request naming both or neither.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstallSkillRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<SkillId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installer_command: Option<String>,
}

#[cfg(test)]
#[path = "skills_tests.rs"]
mod tests;
