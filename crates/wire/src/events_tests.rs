// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_core::{ArtifactId, WorkspaceId};

#[test]
fn envelope_renders_workspace_channel_and_event_name() {
    let workspace_id = WorkspaceId::new();
    let channel = Channel::Workspace(workspace_id.clone());
    let event = Event::ArtifactUpserted { artifact_id: ArtifactId::new(), workspace_id };

    let envelope = BusEnvelope::new(&channel, &event);
    assert!(envelope.channel.starts_with("workspace-"));
    assert_eq!(envelope.event, "artifact:upserted");
    assert!(envelope.payload.get("artifactId").is_none());
    assert!(envelope.payload.get("artifact_id").is_some());
}

#[test]
fn envelope_round_trips_through_json() {
    let workspace_id = WorkspaceId::new();
    let channel = Channel::Workspace(workspace_id.clone());
    let event = Event::ArtifactUpserted { artifact_id: ArtifactId::new(), workspace_id };
    let envelope = BusEnvelope::new(&channel, &event);

    let json = serde_json::to_string(&envelope).unwrap();
    let parsed: BusEnvelope = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, envelope);
}
