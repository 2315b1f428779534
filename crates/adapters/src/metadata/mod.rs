// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installation metadata adapters

mod noop;

pub use noop::NoOpMetadataProvider;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeMetadataProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from metadata lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("metadata lookup failed: {0}")]
    Lookup(String),
}

/// Source of the namespaces an installation created
#[async_trait]
pub trait MetadataProvider: Clone + Send + Sync + 'static {
    /// Namespaces recorded for the installed components
    async fn namespaces(&self) -> Result<Vec<String>, MetadataError>;
}
