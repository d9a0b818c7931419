// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_core::SkillOrigin;

fn sample(workspace_id: WorkspaceId, slug: &str) -> Skill {
    Skill {
        id: SkillId::new(),
        workspace_id,
        slug: slug.into(),
        name: "review checklist".into(),
        description: "".into(),
        content: "do the thing".into(),
        content_hash: relay_core::skill::content_hash("do the thing"),
        source: None,
        origin: SkillOrigin::Manual,
        enabled: true,
    }
}

#[test]
fn insert_rejects_duplicate_slug_in_same_workspace() {
    let mut state = State::default();
    let workspace_id = WorkspaceId::new();
    insert(&mut state, sample(workspace_id.clone(), "checklist")).unwrap();
    let err = insert(&mut state, sample(workspace_id, "checklist")).unwrap_err();
    assert!(matches!(err, StorageError::Kernel(KernelError::Conflict { .. })));
}

#[test]
fn same_slug_allowed_across_workspaces() {
    let mut state = State::default();
    insert(&mut state, sample(WorkspaceId::new(), "checklist")).unwrap();
    insert(&mut state, sample(WorkspaceId::new(), "checklist")).unwrap();
}

#[test]
fn get_by_slug_finds_scoped_skill() {
    let mut state = State::default();
    let workspace_id = WorkspaceId::new();
    let skill = insert(&mut state, sample(workspace_id.clone(), "checklist")).unwrap();
    let found = get_by_slug(&state, &workspace_id, "checklist").unwrap();
    assert_eq!(found.id, skill.id);
}

#[test]
fn update_rejects_slug_clash_with_another_skill() {
    let mut state = State::default();
    let workspace_id = WorkspaceId::new();
    insert(&mut state, sample(workspace_id.clone(), "a")).unwrap();
    let mut second = insert(&mut state, sample(workspace_id, "b")).unwrap();
    second.slug = "a".into();
    assert!(update(&mut state, second).is_err());
}
