// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording progress sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::ProgressSink;
use pi_core::{Phase, ProcessEvent, ProcessUpdate};
use std::sync::{Arc, Mutex};

/// Sink that records every update
#[derive(Clone, Default)]
pub struct FakeProgressSink {
    updates: Arc<Mutex<Vec<ProcessUpdate>>>,
}

impl FakeProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded updates, in order
    pub fn updates(&self) -> Vec<ProcessUpdate> {
        self.updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Recorded lifecycle events (component updates excluded)
    pub fn lifecycle(&self) -> Vec<(Phase, ProcessEvent)> {
        self.updates()
            .into_iter()
            .filter(|u| u.event != ProcessEvent::Running)
            .map(|u| (u.phase, u.event))
            .collect()
    }

    /// Names of the components forwarded as `Running` updates
    pub fn components(&self) -> Vec<String> {
        self.updates()
            .into_iter()
            .filter_map(|u| u.component.map(|c| c.name))
            .collect()
    }
}

impl ProgressSink for FakeProgressSink {
    fn process_update(&self, update: ProcessUpdate) {
        self.updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(update);
    }
}
