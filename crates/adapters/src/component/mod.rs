// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-component removal adapters

mod helm;
mod noop;

pub use helm::HelmUninstaller;
pub use noop::NoOpComponentUninstaller;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeComponentUninstaller;

use async_trait::async_trait;
use pi_core::ComponentSpec;
use thiserror::Error;

/// Errors removing a component
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComponentError {
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("uninstall of {component} failed: {message}")]
    Failed { component: String, message: String },
}

/// Removes one component (a release) from the cluster
#[async_trait]
pub trait ComponentUninstaller: Clone + Send + Sync + 'static {
    /// Remove the component. Removing an absent component succeeds.
    async fn uninstall(&self, component: &ComponentSpec) -> Result<(), ComponentError>;
}
