// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn install_skill_request_content_push_omits_command_fields() {
    let skill_id = SkillId::new();
    let request =
        InstallSkillRequest { skill_id: Some(skill_id.clone()), skill_slug: None, installer_command: None };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["skillId"], serde_json::json!(skill_id.to_string()));
    assert!(json.get("skillSlug").is_none());
    assert!(json.get("installerCommand").is_none());
}

#[test]
fn install_skill_request_command_push_omits_skill_id() {
    let request = InstallSkillRequest {
        skill_id: None,
        skill_slug: Some("run-tests".into()),
        installer_command: Some("buildd skill install run-tests".into()),
    };
    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("skillId").is_none());
    assert_eq!(json["skillSlug"], serde_json::json!("run-tests"));
}
