// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

crate::define_id! {
    pub struct TestId("tst-");
}

#[test]
fn new_ids_carry_prefix() {
    let id = TestId::new();
    assert!(id.as_str().starts_with("tst-"));
    assert_eq!(id.as_str().len(), ID_MAX_LEN);
}

#[test]
fn new_ids_are_unique() {
    assert_ne!(TestId::new(), TestId::new());
}

#[test]
fn from_string_round_trips() {
    let id = TestId::from_string("tst-abc");
    assert_eq!(id.as_str(), "tst-abc");
    assert_eq!(id.suffix(), "abc");
}

#[test]
fn short_truncates_suffix() {
    let id = TestId::from_string("tst-abcdefgh");
    assert_eq!(id.short(3), "abc");
}

#[test]
fn serde_round_trips() {
    let id = TestId::new();
    let json = serde_json::to_string(&id).unwrap();
    let back: TestId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}

#[test]
fn equality_against_str() {
    let id = TestId::from_string("tst-abc");
    assert_eq!(id, "tst-abc");
    assert_eq!(id, *&"tst-abc");
}
