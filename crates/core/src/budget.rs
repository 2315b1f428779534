// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timeout budgets for supervised phase runs

use std::time::Duration;

/// Soft-cancel and hard-quit deadlines for one phase run, relative to its start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutBudget {
    /// After this the engine is asked to wind down
    pub cancel: Duration,
    /// After this the supervisor stops waiting for the engine
    pub quit: Duration,
}

impl TimeoutBudget {
    pub fn new(cancel: Duration, quit: Duration) -> Self {
        Self { cancel, quit }
    }

    /// Budget left once `elapsed` of a shared deadline has been consumed.
    ///
    /// Each part is `max(0, original - elapsed)`.
    pub fn remaining(&self, elapsed: Duration) -> Self {
        Self {
            cancel: self.cancel.saturating_sub(elapsed),
            quit: self.quit.saturating_sub(elapsed),
        }
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;
