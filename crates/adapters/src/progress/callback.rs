// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress sink backed by a caller-supplied function

use super::ProgressSink;
use pi_core::ProcessUpdate;
use std::fmt;
use std::sync::Arc;

/// Forwards each update to a callback
#[derive(Clone)]
pub struct CallbackProgressSink {
    callback: Arc<dyn Fn(ProcessUpdate) + Send + Sync>,
}

impl CallbackProgressSink {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(ProcessUpdate) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }
}

impl fmt::Debug for CallbackProgressSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackProgressSink").finish_non_exhaustive()
    }
}

impl ProgressSink for CallbackProgressSink {
    fn process_update(&self, update: ProcessUpdate) {
        (self.callback)(update);
    }
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;
