// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/tasks*` request/response bodies.

use relay_core::{OutputRequirement, Task, TaskId, TaskMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `POST /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub blocked_by_task_ids: Vec<TaskId>,
    #[serde(default = "default_mode")]
    pub mode: TaskMode,
    #[serde(default)]
    pub output_requirement: OutputRequirement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<serde_json::Value>,
    #[serde(default)]
    pub context: HashMap<String, String>,
}

fn default_mode() -> TaskMode {
    TaskMode::Execute
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskResponse {
    pub task: Task,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

/// `POST /tasks/{id}/start`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartTaskResponse {
    pub started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_local_ui_url: Option<String>,
}

/// `POST /tasks/{id}/reassign[?force=true]` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReassignQuery {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReassignResponse {
    pub reassigned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_takeover: Option<bool>,
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
