// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Dispatch Bus: publish-only from the kernel's perspective. Delivery is
//! at-least-once and consumers are expected to be idempotent; a publish
//! failure is logged and swallowed at the call site rather than propagated,
//! since losing one event must never fail the operation that produced it.

use async_trait::async_trait;
use relay_core::{Channel, Event};
use std::sync::Mutex;

#[derive(Debug, Clone, thiserror::Error)]
#[error("bus publish error: {0}")]
pub struct BusError(pub String);

#[async_trait]
pub trait Bus: Send + Sync {
    async fn publish(&self, channel: Channel, event: Event) -> Result<(), BusError>;
}

/// Publish an event, logging and discarding any failure. Every engine-layer
/// operation that emits events should call this instead of `bus.publish`
/// directly, per the bus's publish-never-fails-the-caller contract.
pub async fn publish_best_effort(bus: &dyn Bus, channel: Channel, event: Event) {
    if let Err(err) = bus.publish(channel.clone(), event).await {
        tracing::warn!(%channel, error = %err, "dispatch bus publish failed");
    }
}

/// In-process bus backed by a `Vec`, used by tests and by `relay-daemon` when
/// no external broker is configured.
#[derive(Default)]
pub struct InMemoryBus {
    published: Mutex<Vec<(Channel, Event)>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<(Channel, Event)> {
        std::mem::take(&mut self.published.lock().unwrap_or_else(|p| p.into_inner()))
    }
}

#[async_trait]
impl Bus for InMemoryBus {
    async fn publish(&self, channel: Channel, event: Event) -> Result<(), BusError> {
        self.published.lock().unwrap_or_else(|p| p.into_inner()).push((channel, event));
        Ok(())
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
