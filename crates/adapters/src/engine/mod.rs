// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase engine adapters
//!
//! A phase engine removes one phase's component list with its own internal
//! concurrency and reports per-component status on a channel. The channel is
//! closed exactly once, when every component reported or after the run
//! observed cancellation.

mod noop;

pub use noop::NoOpPhaseEngine;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AfterScript, FakePhaseEngine};

use async_trait::async_trait;
use pi_core::{CancelSignal, Component};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors starting a phase engine run
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine start failed: {0}")]
    StartFailed(String),
}

/// Adapter for the engine that removes one phase's components
#[async_trait]
pub trait PhaseEngine: Clone + Send + Sync + 'static {
    /// Start removing the phase's components.
    ///
    /// The returned stream yields status events and closes once the run is
    /// over. `cancel` is advisory: the engine stops dispatching new work once
    /// it fires.
    async fn uninstall(
        &self,
        cancel: CancelSignal,
    ) -> Result<mpsc::Receiver<Component>, EngineError>;
}
