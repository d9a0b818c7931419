// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurring Scheduler: a single cluster-wide tick loop, run by
//! `relay-daemon` every 30s, that fires due [`relay_core::Schedule`]s.
//!
//! Each schedule ticks under its own advisory lock so two overlapping ticks
//! (a slow probe plus the next 30s wakeup) never race each other, while
//! unrelated schedules still progress concurrently.

use crate::dispatch::{publish_best_effort, Bus};
use crate::error::{EngineError, EngineResult};
use crate::trigger;
use chrono::{DateTime, TimeZone, Utc};
use relay_core::{Channel, Event, KernelError, Schedule, ScheduleId, Task, TaskMode};
use relay_storage::Store;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

/// Key a schedule lives under in a task's `context`, so the scheduler can
/// count how many live tasks it has already spawned.
const SCHEDULE_CONTEXT_KEY: &str = "schedule_id";

/// Registry of per-schedule advisory locks, keyed by [`ScheduleId`]. Held
/// only for the duration of one schedule's tick.
#[derive(Default)]
pub struct SchedulerLocks {
    locks: AsyncMutex<HashMap<ScheduleId, Arc<AsyncMutex<()>>>>,
}

impl SchedulerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    async fn lock_for(&self, id: &ScheduleId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub fired: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Run one pass over every due schedule. Safe to call concurrently with
/// itself (e.g. overlapping cron ticks); per-schedule locking serializes
/// the parts that touch one schedule's state.
pub async fn tick(
    store: &dyn Store,
    bus: &dyn Bus,
    locks: &SchedulerLocks,
    now_ms: u64,
) -> EngineResult<TickSummary> {
    let due = store.list_due_schedules(now_ms).await?;
    let mut summary = TickSummary::default();

    for due_schedule in due {
        let lock = locks.lock_for(&due_schedule.id).await;
        let _guard = lock.lock().await;

        let schedule = store.get_schedule(&due_schedule.id).await?;
        if !schedule.enabled {
            continue;
        }

        match tick_one(store, bus, schedule, now_ms).await {
            Ok(true) => summary.fired += 1,
            Ok(false) => summary.skipped += 1,
            Err(err) => {
                tracing::warn!(schedule_id = %due_schedule.id, error = %err, "schedule tick failed");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Returns `Ok(true)` if a task was instantiated, `Ok(false)` if the tick
/// was a legitimate no-op (trigger unchanged, or at schedule capacity).
async fn tick_one(
    store: &dyn Store,
    bus: &dyn Bus,
    mut schedule: Schedule,
    now_ms: u64,
) -> EngineResult<bool> {
    let trigger_value = match &schedule.trigger {
        Some(spec) => match trigger::probe(spec).await {
            Ok(value) => value,
            Err(err) => {
                let next = compute_next_run(&schedule.cron_expression, &schedule.timezone, now_ms)
                    .unwrap_or(now_ms + 60_000);
                schedule.record_failure(err.to_string(), next);
                store.update_schedule(schedule).await?;
                return Err(err);
            }
        },
        None => None,
    };

    if let Some(value) = &trigger_value {
        let unchanged = schedule.trigger.as_ref().is_some_and(|spec| spec.last_trigger_value.as_deref() == Some(value.as_str()));
        if unchanged {
            let next = compute_next_run(&schedule.cron_expression, &schedule.timezone, now_ms)?;
            schedule.next_run_at_ms = Some(next);
            if let Some(spec) = schedule.trigger.as_mut() {
                spec.total_checks += 1;
                spec.last_checked_at_ms = Some(now_ms);
            }
            store.update_schedule(schedule).await?;
            return Ok(false);
        }
    }

    let live = store
        .list_tasks(&schedule.workspace_id)
        .await?
        .into_iter()
        .filter(|t| {
            !t.status.is_terminal()
                && t.context.get(SCHEDULE_CONTEXT_KEY).map(|v| v.as_str()) == Some(schedule.id.as_str())
        })
        .count() as u32;
    if live >= schedule.max_concurrent_from_schedule {
        let next = compute_next_run(&schedule.cron_expression, &schedule.timezone, now_ms)?;
        schedule.next_run_at_ms = Some(next);
        store.update_schedule(schedule).await?;
        return Ok(false);
    }

    let result = instantiate_and_advance(store, bus, &mut schedule, trigger_value.as_deref(), now_ms).await;
    match result {
        Ok(()) => {
            let next = compute_next_run(&schedule.cron_expression, &schedule.timezone, now_ms)?;
            if let Some(spec) = schedule.trigger.as_mut() {
                spec.total_checks += 1;
                spec.last_checked_at_ms = Some(now_ms);
                if let Some(value) = trigger_value {
                    spec.last_trigger_value = Some(value);
                }
            }
            schedule.record_run(next);
            store.update_schedule(schedule).await?;
            Ok(true)
        }
        Err(err) => {
            let next = compute_next_run(&schedule.cron_expression, &schedule.timezone, now_ms)
                .unwrap_or(now_ms + 60_000);
            schedule.record_failure(err.to_string(), next);
            store.update_schedule(schedule).await?;
            Err(err)
        }
    }
}

async fn instantiate_and_advance(
    store: &dyn Store,
    bus: &dyn Bus,
    schedule: &mut Schedule,
    trigger_value: Option<&str>,
    now_ms: u64,
) -> EngineResult<()> {
    let (title, description) = schedule.task_template.render(trigger_value);
    let mut task = Task::new(
        schedule.workspace_id.clone(),
        title,
        description,
        schedule.task_template.priority,
        Vec::new(),
        TaskMode::Execute,
        relay_core::OutputRequirement::Auto,
        now_ms,
    );
    task.context = schedule.task_template.context.clone();
    task.context.insert(SCHEDULE_CONTEXT_KEY.to_string(), schedule.id.as_str().to_string());
    let task = store.insert_task(task).await?;

    tracing::info!(schedule_id = %schedule.id, task_id = %task.id, "schedule fired");
    publish_best_effort(
        bus,
        Channel::Workspace(schedule.workspace_id.clone()),
        Event::TaskAssigned { task, target_local_ui_url: None },
    )
    .await;
    Ok(())
}

/// A standard 5-field UNIX cron expression is accepted alongside the 6-field
/// `cron` crate form with an explicit leading seconds field.
fn normalize_expression(expression: &str) -> String {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    if fields.len() == 5 {
        format!("0 {expression}")
    } else {
        expression.to_string()
    }
}

fn compute_next_run(expression: &str, timezone: &str, now_ms: u64) -> EngineResult<u64> {
    let tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| EngineError::Kernel(KernelError::invalid(format!("unknown timezone '{timezone}'"))))?;
    let schedule = cron::Schedule::from_str(&normalize_expression(expression))
        .map_err(|e| EngineError::Kernel(KernelError::invalid(format!("invalid cron expression: {e}"))))?;

    let now_utc = Utc
        .timestamp_millis_opt(now_ms as i64)
        .single()
        .ok_or_else(|| EngineError::Kernel(KernelError::invalid("timestamp out of range")))?;
    let now_tz = now_utc.with_timezone(&tz);

    schedule
        .after(&now_tz)
        .next()
        .map(|dt| dt.with_timezone(&Utc).timestamp_millis().max(0) as u64)
        .ok_or_else(|| EngineError::Kernel(KernelError::invalid("cron expression never fires again")))
}

/// Outcome of `ValidateCron`.
pub enum CronValidation {
    Valid { description: String, next_runs: Vec<DateTime<Utc>> },
    Invalid { reason: String },
}

/// Validate a cron expression/timezone pair and compute its next 5 fires.
/// Rejects expressions that don't parse and expressions with no future fire.
pub fn validate_cron(expression: &str, timezone: &str, now_ms: u64) -> CronValidation {
    let tz: chrono_tz::Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return CronValidation::Invalid { reason: format!("unknown timezone '{timezone}'") },
    };
    let schedule = match cron::Schedule::from_str(&normalize_expression(expression)) {
        Ok(s) => s,
        Err(e) => return CronValidation::Invalid { reason: format!("invalid cron expression: {e}") },
    };
    let Some(now_utc) = Utc.timestamp_millis_opt(now_ms as i64).single() else {
        return CronValidation::Invalid { reason: "timestamp out of range".into() };
    };
    let now_tz = now_utc.with_timezone(&tz);

    let next_runs: Vec<DateTime<Utc>> =
        schedule.after(&now_tz).take(5).map(|dt| dt.with_timezone(&Utc)).collect();
    if next_runs.is_empty() {
        return CronValidation::Invalid { reason: "cron expression never fires again".into() };
    }
    CronValidation::Valid { description: format!("{expression} ({timezone})"), next_runs }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
