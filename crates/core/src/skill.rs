// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Skill: a named markdown instruction bundle available to the agent.

use crate::workspace::WorkspaceId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

crate::define_id! {
    /// Unique identifier for a skill.
    pub struct SkillId("skl-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillOrigin {
    Scan,
    Manual,
    Promoted,
}

/// A named instruction bundle, unique by `(workspace_id, slug)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub workspace_id: WorkspaceId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub content: String,
    pub content_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub origin: SkillOrigin,
    pub enabled: bool,
}

/// Lowercase-hyphenated slug format: `[a-z0-9]+(-[a-z0-9]+)*`.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }
    slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "skill_tests.rs"]
mod tests;
