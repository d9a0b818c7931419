// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The raw maps behind [`super::MemoryStore`]. Never held across an `.await`.

use relay_core::{
    Account, AccountId, Artifact, ArtifactId, Observation, ObservationId, Runner, RunnerId,
    Schedule, ScheduleId, Skill, SkillId, Task, TaskId, Worker, WorkerId, Workspace, WorkspaceId,
};
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct State {
    pub accounts: HashMap<AccountId, Account>,
    pub workspaces: HashMap<WorkspaceId, Workspace>,
    pub tasks: HashMap<TaskId, Task>,
    pub workers: HashMap<WorkerId, Worker>,
    pub runners: HashMap<RunnerId, Runner>,
    pub schedules: HashMap<ScheduleId, Schedule>,
    pub observations: HashMap<ObservationId, Observation>,
    pub artifacts: HashMap<ArtifactId, Artifact>,
    pub skills: HashMap<SkillId, Skill>,
}
