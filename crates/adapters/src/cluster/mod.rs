// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster access adapters

mod noop;

pub use noop::NoOpClusterAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ClusterCall, FailPoint, FakeClusterAdapter};

use async_trait::async_trait;
use pi_core::{Pod, Resource, ResourceKind};
use thiserror::Error;

/// Errors from cluster operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClusterError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("api error: {0}")]
    Api(String),
}

impl ClusterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClusterError::NotFound(_))
    }
}

/// Adapter for the cluster API calls namespace teardown needs
#[async_trait]
pub trait ClusterAdapter: Clone + Send + Sync + 'static {
    /// List pods in a namespace
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, ClusterError>;

    /// Delete a namespace
    async fn delete_namespace(&self, namespace: &str) -> Result<(), ClusterError>;

    /// List resources of a kind; `namespace` is `None` for cluster-scoped kinds
    async fn list_resources(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<Resource>, ClusterError>;

    /// Get a single resource by name
    async fn get_resource(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Resource, ClusterError>;

    /// Persist a resource's metadata (its finalizer list)
    async fn update_resource(
        &self,
        kind: &ResourceKind,
        resource: &Resource,
    ) -> Result<Resource, ClusterError>;
}
