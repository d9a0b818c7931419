// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule: a cron-plus-template rule that instantiates tasks over time.

use crate::workspace::WorkspaceId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

crate::define_id! {
    /// Unique identifier for a schedule.
    pub struct ScheduleId("sch-");
}

/// The template a schedule instantiates into a task on each fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl TaskTemplate {
    /// Substitute `{{triggerValue}}` in title/description.
    pub fn render(&self, trigger_value: Option<&str>) -> (String, String) {
        let value = trigger_value.unwrap_or_default();
        (
            self.title.replace("{{triggerValue}}", value),
            self.description.replace("{{triggerValue}}", value),
        )
    }
}

/// The kind of external condition gating a schedule's fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    HttpJson,
    Rss,
}

/// Trigger configuration and last-observed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    pub url: String,
    /// JSONPath expression, required and only meaningful for `http_json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_trigger_value: Option<String>,
    #[serde(default)]
    pub total_checks: u64,
}

/// A recurring task template, fired by a cron expression in an IANA
/// timezone, optionally gated by a [`TriggerSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub cron_expression: String,
    pub timezone: String,
    pub enabled: bool,
    pub task_template: TaskTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_at_ms: Option<u64>,
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_from_schedule: u32,
    #[serde(default = "default_pause_after_failures")]
    pub pause_after_failures: u32,
    #[serde(default)]
    pub consecutive_failures: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(default)]
    pub total_runs: u64,
}

fn default_max_concurrent() -> u32 {
    1
}

fn default_pause_after_failures() -> u32 {
    5
}

impl Schedule {
    /// Record a successful fire or a skipped-due-to-capacity tick.
    pub fn record_run(&mut self, next_run_at_ms: u64) {
        self.total_runs += 1;
        self.consecutive_failures = 0;
        self.last_error = None;
        self.next_run_at_ms = Some(next_run_at_ms);
    }

    /// Record a probe or instantiation failure. Auto-disables once
    /// `consecutive_failures >= pause_after_failures`, per spec.md's stated
    /// decision that both failure kinds count identically.
    pub fn record_failure(&mut self, error: impl Into<String>, next_run_at_ms: u64) {
        self.consecutive_failures += 1;
        self.last_error = Some(error.into());
        if self.consecutive_failures >= self.pause_after_failures {
            self.enabled = false;
            self.next_run_at_ms = None;
        } else {
            self.next_run_at_ms = Some(next_run_at_ms);
        }
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
