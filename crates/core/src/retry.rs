// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry policy for namespace liveness pre-checks

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the delay grows between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backoff {
    Fixed,
    #[default]
    Exponential,
}

/// Number of attempts and the delays between them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub attempts: u32,
    /// Delay after the first failed attempt
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
    pub backoff: Backoff,
    /// Upper bound for a single delay
    #[serde(with = "humantime_serde")]
    pub max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay: Duration::from_millis(100),
            backoff: Backoff::Exponential,
            max_delay: None,
        }
    }
}

impl RetryPolicy {
    pub fn fixed(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts,
            delay,
            backoff: Backoff::Fixed,
            max_delay: None,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Delay to wait after `failed` attempts have failed (1-based)
    pub fn delay_after(&self, failed: u32) -> Duration {
        let delay = match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential => {
                let factor = 1u32
                    .checked_shl(failed.saturating_sub(1))
                    .unwrap_or(u32::MAX);
                self.delay.saturating_mul(factor)
            }
        };
        match self.max_delay {
            Some(max) => delay.min(max),
            None => delay,
        }
    }

    /// True if another attempt is allowed after `failed` failures
    pub fn should_retry(&self, failed: u32) -> bool {
        failed < self.attempts
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
