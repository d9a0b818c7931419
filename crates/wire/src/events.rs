// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The language-neutral event-bus wire format: every event carries
//! `{channel, event, payload}`, where `channel` renders as `workspace-<id>`,
//! `worker-<id>`, or `task-<id>` and `payload` is the event's own fields.

use relay_core::{Channel, Event};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusEnvelope {
    pub channel: String,
    pub event: String,
    pub payload: serde_json::Value,
}

impl BusEnvelope {
    pub fn new(channel: &Channel, event: &Event) -> Self {
        let tagged = serde_json::to_value(event).unwrap_or_else(|_| serde_json::Value::Null);
        let name = tagged.get("type").and_then(|v| v.as_str()).unwrap_or_default().to_string();
        Self { channel: channel.to_string(), event: name, payload: tagged }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
