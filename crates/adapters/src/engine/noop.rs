// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op phase engine

use super::{EngineError, PhaseEngine};
use async_trait::async_trait;
use pi_core::{CancelSignal, Component};
use tokio::sync::mpsc;

/// Phase engine with nothing to remove; its stream closes immediately
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPhaseEngine;

impl NoOpPhaseEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhaseEngine for NoOpPhaseEngine {
    async fn uninstall(
        &self,
        _cancel: CancelSignal,
    ) -> Result<mpsc::Receiver<Component>, EngineError> {
        let (_tx, rx) = mpsc::channel(1);
        Ok(rx)
    }
}
