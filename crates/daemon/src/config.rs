// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-variable driven configuration, with typed fallback defaults.
//! Mirrors the timeouts named in the coordination spec's concurrency model.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bus_url: Option<String>,
    /// How often `relay-daemon` runs a full scheduler tick.
    pub scheduler_tick: Duration,
    /// How often the stale-worker sweep runs.
    pub stale_check_interval: Duration,
    /// Reserved for a future network-backed `Store`; the in-memory reference
    /// implementation uses `relay_core::LIVENESS_WINDOW_MS` directly.
    pub heartbeat_window: Duration,
    /// Claim lease TTL, renewed by any worker heartbeat `PATCH`.
    pub claim_lease: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env_string("RELAY_DATABASE_URL", "memory://local"),
            bus_url: std::env::var("RELAY_BUS_URL").ok().filter(|s| !s.is_empty()),
            scheduler_tick: env_duration_ms("RELAY_SCHEDULER_TICK_MS", 30_000),
            stale_check_interval: env_duration_ms("RELAY_STALE_CHECK_MS", 60_000),
            heartbeat_window: env_duration_ms(
                "RELAY_HEARTBEAT_WINDOW_MS",
                relay_core::LIVENESS_WINDOW_MS,
            ),
            claim_lease: env_duration_ms("RELAY_CLAIM_LEASE_MS", 15 * 60_000),
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|s| !s.is_empty()).unwrap_or_else(|| default.to_string())
}

fn env_duration_ms(key: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(key).ok().and_then(|s| s.parse::<u64>().ok()).unwrap_or(default_ms);
    Duration::from_millis(ms)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
