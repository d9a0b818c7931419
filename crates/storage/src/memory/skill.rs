// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Skill CRUD. Unique by `(workspace_id, slug)`.

use super::state::State;
use crate::error::{StorageError, StorageResult};
use relay_core::{KernelError, Skill, SkillId, WorkspaceId};

pub(crate) fn insert(state: &mut State, skill: Skill) -> StorageResult<Skill> {
    let clash = state
        .skills
        .values()
        .any(|s| s.workspace_id == skill.workspace_id && s.slug == skill.slug);
    if clash {
        return Err(StorageError::Kernel(KernelError::conflict("slug already in use in this workspace")));
    }
    state.skills.insert(skill.id.clone(), skill.clone());
    Ok(skill)
}

pub(crate) fn get(state: &State, id: &SkillId) -> StorageResult<Skill> {
    state.skills.get(id).cloned().ok_or_else(|| StorageError::Kernel(KernelError::not_found("skill")))
}

pub(crate) fn get_by_slug(state: &State, workspace_id: &WorkspaceId, slug: &str) -> StorageResult<Skill> {
    state
        .skills
        .values()
        .find(|s| &s.workspace_id == workspace_id && s.slug == slug)
        .cloned()
        .ok_or_else(|| StorageError::Kernel(KernelError::not_found("skill")))
}

pub(crate) fn update(state: &mut State, skill: Skill) -> StorageResult<Skill> {
    if !state.skills.contains_key(&skill.id) {
        return Err(StorageError::Kernel(KernelError::not_found("skill")));
    }
    let clash = state
        .skills
        .values()
        .any(|s| s.id != skill.id && s.workspace_id == skill.workspace_id && s.slug == skill.slug);
    if clash {
        return Err(StorageError::Kernel(KernelError::conflict("slug already in use in this workspace")));
    }
    state.skills.insert(skill.id.clone(), skill.clone());
    Ok(skill)
}

pub(crate) fn delete(state: &mut State, id: &SkillId) -> StorageResult<()> {
    state.skills.remove(id).map(|_| ()).ok_or_else(|| StorageError::Kernel(KernelError::not_found("skill")))
}

pub(crate) fn list(state: &State, workspace_id: &WorkspaceId) -> StorageResult<Vec<Skill>> {
    Ok(state.skills.values().filter(|s| &s.workspace_id == workspace_id).cloned().collect())
}

#[cfg(test)]
#[path = "skill_tests.rs"]
mod tests;
