// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op progress sink

use super::ProgressSink;
use pi_core::ProcessUpdate;

/// Sink that discards every update
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpProgressSink;

impl NoOpProgressSink {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressSink for NoOpProgressSink {
    fn process_update(&self, _update: ProcessUpdate) {}
}
