// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicU32, Ordering};

#[tokio::test]
async fn retries_transient_then_succeeds() {
    let attempts = AtomicU32::new(0);
    let result: StorageResult<u32> = with_retry(3, || async {
        let n = attempts.fetch_add(1, Ordering::SeqCst);
        if n < 2 {
            Err(StorageError::Transient("pool exhausted".into()))
        } else {
            Ok(42)
        }
    })
    .await;
    assert_eq!(result.unwrap(), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn does_not_retry_kernel_errors() {
    let attempts = AtomicU32::new(0);
    let result: StorageResult<u32> = with_retry(3, || async {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Kernel(KernelError::not_found("task")))
    })
    .await;
    assert!(result.is_err());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn gives_up_after_exhausting_attempts() {
    let result: StorageResult<u32> =
        with_retry(2, || async { Err(StorageError::Transient("down".into())) }).await;
    assert!(matches!(result, Err(StorageError::Transient(_))));
}
