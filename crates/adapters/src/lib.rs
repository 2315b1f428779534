// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the collaborators an uninstallation run talks to

pub mod cluster;
pub mod component;
pub mod engine;
pub mod metadata;
pub mod progress;
pub mod traced;

pub use cluster::{ClusterAdapter, ClusterError, NoOpClusterAdapter};
pub use component::{
    ComponentError, ComponentUninstaller, HelmUninstaller, NoOpComponentUninstaller,
};
pub use engine::{EngineError, NoOpPhaseEngine, PhaseEngine};
pub use metadata::{MetadataError, MetadataProvider, NoOpMetadataProvider};
pub use progress::{CallbackProgressSink, NoOpProgressSink, ProgressSink};
pub use traced::{TracedClusterAdapter, TracedComponentUninstaller, TracedPhaseEngine};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use cluster::{ClusterCall, FailPoint, FakeClusterAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use component::FakeComponentUninstaller;
#[cfg(any(test, feature = "test-support"))]
pub use engine::{AfterScript, FakePhaseEngine};
#[cfg(any(test, feature = "test-support"))]
pub use metadata::FakeMetadataProvider;
#[cfg(any(test, feature = "test-support"))]
pub use progress::FakeProgressSink;
