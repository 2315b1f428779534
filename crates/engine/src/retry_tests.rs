// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn retry_returns_first_success() {
    let policy = RetryPolicy::fixed(5, Duration::from_secs(1));
    let calls = AtomicU32::new(0);

    let result: Result<u32, String> = retry(&policy, |attempt| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt < 3 {
                Err(format!("attempt {} failed", attempt))
            } else {
                Ok(attempt)
            }
        }
    })
    .await;

    assert_eq!(result, Ok(3));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn retry_gives_up_with_last_error() {
    let policy = RetryPolicy::fixed(4, Duration::from_secs(1));
    let started = Instant::now();

    let result: Result<(), String> =
        retry(&policy, |attempt| async move { Err(format!("attempt {}", attempt)) }).await;

    assert_eq!(result, Err("attempt 4".to_string()));
    // Three delays between four attempts, none after the last
    let elapsed = started.elapsed();
    assert!(
        elapsed >= Duration::from_secs(3) && elapsed < Duration::from_secs(4),
        "{:?}",
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn retry_waits_exponentially() {
    let policy = RetryPolicy {
        attempts: 4,
        delay: Duration::from_millis(100),
        ..RetryPolicy::default()
    };
    let started = Instant::now();

    let _: Result<(), ()> = retry(&policy, |_| async { Err(()) }).await;

    // 100ms + 200ms + 400ms
    let elapsed = started.elapsed();
    assert!(
        elapsed >= Duration::from_millis(700) && elapsed < Duration::from_millis(710),
        "{:?}",
        elapsed
    );
}

#[tokio::test]
async fn single_attempt_does_not_sleep() {
    let policy = RetryPolicy::fixed(1, Duration::from_secs(3600));

    let result: Result<(), &str> = retry(&policy, |_| async { Err("down") }).await;

    assert_eq!(result, Err("down"));
}
