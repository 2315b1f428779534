// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async retry runner

use pi_core::RetryPolicy;
use std::future::Future;

/// Run `op` until it succeeds or `policy` runs out of attempts.
///
/// `op` receives the 1-based attempt number. The last error is returned when
/// every attempt failed.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut failed = 0;
    loop {
        match op(failed + 1).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                failed += 1;
                if !policy.should_retry(failed) {
                    return Err(e);
                }
                tokio::time::sleep(policy.delay_after(failed)).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
