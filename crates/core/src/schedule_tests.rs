// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn render_substitutes_trigger_value() {
    let template = TaskTemplate {
        title: "New item: {{triggerValue}}".into(),
        description: "Check {{triggerValue}} out".into(),
        priority: 3,
        context: HashMap::new(),
    };
    let (title, desc) = template.render(Some("widget-42"));
    assert_eq!(title, "New item: widget-42");
    assert_eq!(desc, "Check widget-42 out");
}

#[test]
fn consecutive_failures_auto_disable_at_threshold() {
    let mut schedule = Schedule {
        id: ScheduleId::new(),
        workspace_id: WorkspaceId::new(),
        name: "n".into(),
        cron_expression: "0 * * * * *".into(),
        timezone: "UTC".into(),
        enabled: true,
        task_template: TaskTemplate { title: "t".into(), description: "d".into(), priority: 0, context: HashMap::new() },
        trigger: None,
        next_run_at_ms: Some(1_000),
        max_concurrent_from_schedule: 1,
        pause_after_failures: 3,
        consecutive_failures: 0,
        last_error: None,
        total_runs: 0,
    };

    schedule.record_failure("boom 1", 2_000);
    assert!(schedule.enabled);
    schedule.record_failure("boom 2", 3_000);
    assert!(schedule.enabled);
    schedule.record_failure("boom 3", 4_000);
    assert!(!schedule.enabled);
    assert!(schedule.next_run_at_ms.is_none());
}

#[test]
fn record_run_resets_failure_streak() {
    let mut schedule = Schedule {
        id: ScheduleId::new(),
        workspace_id: WorkspaceId::new(),
        name: "n".into(),
        cron_expression: "0 * * * * *".into(),
        timezone: "UTC".into(),
        enabled: true,
        task_template: TaskTemplate { title: "t".into(), description: "d".into(), priority: 0, context: HashMap::new() },
        trigger: None,
        next_run_at_ms: Some(1_000),
        max_concurrent_from_schedule: 1,
        pause_after_failures: 3,
        consecutive_failures: 2,
        last_error: Some("prior".into()),
        total_runs: 4,
    };
    schedule.record_run(9_000);
    assert_eq!(schedule.consecutive_failures, 0);
    assert!(schedule.last_error.is_none());
    assert_eq!(schedule.total_runs, 5);
    assert_eq!(schedule.next_run_at_ms, Some(9_000));
}
