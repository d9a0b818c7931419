// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property tests: arbitrary request bodies survive a JSON round-trip.

use crate::error::ErrorBody;
use crate::tasks::{CreateTaskRequest, ReassignQuery};
use proptest::prelude::*;
use relay_core::{OutputRequirement, TaskMode};

fn arb_task_mode() -> impl Strategy<Value = TaskMode> {
    prop_oneof![Just(TaskMode::Execute), Just(TaskMode::Planning)]
}

fn arb_output_requirement() -> impl Strategy<Value = OutputRequirement> {
    prop_oneof![
        Just(OutputRequirement::Auto),
        Just(OutputRequirement::PrRequired),
        Just(OutputRequirement::ArtifactRequired),
        Just(OutputRequirement::None),
    ]
}

proptest! {
    #[test]
    fn create_task_request_round_trips(
        title in ".*",
        description in ".*",
        priority in 0u8..=10,
        mode in arb_task_mode(),
        output_requirement in arb_output_requirement(),
    ) {
        let request = CreateTaskRequest {
            title,
            description,
            priority,
            project: None,
            blocked_by_task_ids: Vec::new(),
            mode,
            output_requirement,
            output_schema: None,
            context: Default::default(),
        };
        let json = serde_json::to_string(&request).unwrap();
        let parsed: CreateTaskRequest = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, request);
    }

    #[test]
    fn reassign_query_round_trips(force in any::<bool>()) {
        let query = ReassignQuery { force };
        let json = serde_json::to_string(&query).unwrap();
        let parsed: ReassignQuery = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, query);
    }

    #[test]
    fn error_body_round_trips(
        error in ".*",
        current in proptest::option::of(any::<u32>()),
        limit in proptest::option::of(any::<u32>()),
    ) {
        let body = ErrorBody { error, code: None, hint: None, current, limit };
        let json = serde_json::to_string(&body).unwrap();
        let parsed: ErrorBody = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, body);
    }
}
