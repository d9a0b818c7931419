// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background periodic loops: the recurring-schedule tick and the
//! stale-worker sweep. Both run on their own `tokio::time::interval` for the
//! lifetime of the process; a failed tick is logged and the loop keeps going
//! rather than aborting the daemon over one bad pass.

use crate::kernel::Kernel;
use relay_core::Clock;
use relay_engine::scheduler::SchedulerLocks;
use std::sync::Arc;
use std::time::Duration;

/// Drive the recurring-schedule tick on `interval`, forever.
pub async fn run_scheduler_loop<C: Clock>(kernel: Arc<Kernel<C>>, locks: Arc<SchedulerLocks>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let now_ms = kernel.clock.epoch_ms();
        match kernel.run_scheduler_tick(&locks, now_ms).await {
            Ok(summary) => {
                if summary.fired > 0 || summary.failed > 0 {
                    tracing::info!(
                        fired = summary.fired,
                        skipped = summary.skipped,
                        failed = summary.failed,
                        "scheduler tick complete"
                    );
                }
            }
            Err(err) => tracing::warn!(error = %err, "scheduler tick errored"),
        }
    }
}

/// Drive the stale-worker sweep on `interval`, forever.
pub async fn run_stale_sweep_loop<C: Clock>(kernel: Arc<Kernel<C>>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let now_ms = kernel.clock.epoch_ms();
        match kernel.sweep_stale_workers(now_ms).await {
            Ok(recovered) if !recovered.is_empty() => {
                tracing::info!(count = recovered.len(), "recovered stale workers");
            }
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "stale worker sweep errored"),
        }
    }
}
