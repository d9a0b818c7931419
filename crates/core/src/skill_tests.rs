// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn valid_slugs() {
    assert!(is_valid_slug("review-checklist"));
    assert!(is_valid_slug("a"));
    assert!(is_valid_slug("a1-b2"));
}

#[test]
fn invalid_slugs() {
    assert!(!is_valid_slug(""));
    assert!(!is_valid_slug("-leading"));
    assert!(!is_valid_slug("trailing-"));
    assert!(!is_valid_slug("double--hyphen"));
    assert!(!is_valid_slug("Has_Caps"));
    assert!(!is_valid_slug("has_underscore"));
}

#[test]
fn content_hash_is_deterministic_and_sensitive() {
    let h1 = content_hash("hello");
    let h2 = content_hash("hello");
    let h3 = content_hash("hello!");
    assert_eq!(h1, h2);
    assert_ne!(h1, h3);
    assert_eq!(h1.len(), 64);
}
