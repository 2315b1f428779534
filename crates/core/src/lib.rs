// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pi-core: Core types for phased platform uninstallation
//!
//! This crate provides:
//! - The phase/component/progress data model shared by adapters and engine
//! - A pure state machine for one supervised phase run
//! - Timeout budgets, retry policy and cancellation primitives
//! - Deletion configuration loaded from TOML

pub mod budget;
pub mod cancel;
pub mod clock;
pub mod component;
pub mod config;
pub mod phase;
pub mod progress;
pub mod resource;
pub mod retry;
pub mod supervision;

// Re-exports
pub use budget::TimeoutBudget;
pub use cancel::CancelSignal;
pub use clock::{Clock, FakeClock, SystemClock};
pub use component::{Component, ComponentSpec, ComponentStatus, StatusMap};
pub use config::{ComponentList, ConfigError, DeletionConfig};
pub use phase::Phase;
pub use progress::{ProcessEvent, ProcessUpdate};
pub use resource::{
    stuck_finalizer_targets, FinalizerTarget, Pod, PodPhase, Resource, ResourceKind, TargetScope,
};
pub use retry::{Backoff, RetryPolicy};
pub use supervision::{PhaseRun, RunEffect, RunInput, RunOutcome, RunState};
