// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observation: a workspace-scoped note recorded by agents or humans.

use crate::workspace::WorkspaceId;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for an observation.
    pub struct ObservationId("obs-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationType {
    Discovery,
    Decision,
    Gotcha,
    Pattern,
    Architecture,
    Summary,
}

/// An immutable, workspace-scoped note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub id: ObservationId,
    pub workspace_id: WorkspaceId,
    #[serde(rename = "type")]
    pub kind: ObservationType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<String>,
    pub created_at_ms: u64,
}

impl Observation {
    /// Naive substring/tag match over title + content + concepts. Full-text
    /// search indexes are a Non-goal; this is an in-process filter.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q)
            || self.content.to_lowercase().contains(&q)
            || self.concepts.iter().any(|c| c.to_lowercase().contains(&q))
    }
}

#[cfg(test)]
#[path = "observation_tests.rs"]
mod tests;
