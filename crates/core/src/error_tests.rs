// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn capacity_exceeded_maps_to_429() {
    let err = KernelError::CapacityExceeded { current: 2, limit: 2 };
    assert_eq!(err.status_code(), 429);
}

#[test]
fn not_found_maps_to_404() {
    assert_eq!(KernelError::not_found("task").status_code(), 404);
}

#[test]
fn serializes_with_tagged_code() {
    let err = KernelError::OutputGateFailed { hint: "create_pr".into() };
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["code"], "output_gate_failed");
    assert_eq!(json["hint"], "create_pr");
}
