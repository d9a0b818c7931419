// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `relayd`: the coordination daemon entry point. Boots the in-process
//! reference store and bus, wires them into a [`relay_daemon::Kernel`], and
//! runs the two background loops (recurring schedules, stale-worker sweep)
//! until asked to shut down. No HTTP listener lives here; this binary is the
//! kernel's host process, callable today only by an embedder that links
//! against the `relay-daemon` library directly.

use relay_core::SystemClock;
use relay_daemon::kernel::Kernel;
use relay_daemon::{config, logging, ticks};
use relay_engine::dispatch::InMemoryBus;
use relay_engine::scheduler::SchedulerLocks;
use relay_storage::MemoryStore;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    logging::init_tracing();
    let config = config::Config::from_env();
    tracing::info!(
        scheduler_tick_ms = config.scheduler_tick.as_millis() as u64,
        stale_check_ms = config.stale_check_interval.as_millis() as u64,
        "starting relayd"
    );

    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(InMemoryBus::new());
    let locks = Arc::new(SchedulerLocks::new());
    let kernel = Arc::new(Kernel::new(store, bus, SystemClock, config.claim_lease.as_millis() as u64));

    let scheduler_loop =
        tokio::spawn(ticks::run_scheduler_loop(kernel.clone(), locks, config.scheduler_tick));
    let stale_sweep_loop =
        tokio::spawn(ticks::run_stale_sweep_loop(kernel.clone(), config.stale_check_interval));

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => tracing::warn!(error = %err, "failed to install shutdown signal handler"),
    }

    scheduler_loop.abort();
    stale_sweep_loop.abort();
}
