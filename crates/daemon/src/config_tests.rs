// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear_env() {
    for key in [
        "RELAY_DATABASE_URL",
        "RELAY_BUS_URL",
        "RELAY_SCHEDULER_TICK_MS",
        "RELAY_STALE_CHECK_MS",
        "RELAY_HEARTBEAT_WINDOW_MS",
        "RELAY_CLAIM_LEASE_MS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn defaults_apply_when_unset() {
    clear_env();
    let config = Config::from_env();
    assert_eq!(config.database_url, "memory://local");
    assert!(config.bus_url.is_none());
    assert_eq!(config.scheduler_tick, Duration::from_secs(30));
    assert_eq!(config.claim_lease, Duration::from_secs(15 * 60));
    clear_env();
}

#[test]
#[serial]
fn overrides_are_read_from_env() {
    clear_env();
    std::env::set_var("RELAY_DATABASE_URL", "postgres://example/relay");
    std::env::set_var("RELAY_SCHEDULER_TICK_MS", "5000");

    let config = Config::from_env();
    assert_eq!(config.database_url, "postgres://example/relay");
    assert_eq!(config.scheduler_tick, Duration::from_millis(5000));
    clear_env();
}
