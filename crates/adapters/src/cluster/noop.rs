// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op cluster adapter

use super::{ClusterAdapter, ClusterError};
use async_trait::async_trait;
use pi_core::{Pod, Resource, ResourceKind};

/// Cluster adapter for an empty cluster: nothing runs, nothing exists
#[derive(Clone, Debug, Default)]
pub struct NoOpClusterAdapter;

impl NoOpClusterAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClusterAdapter for NoOpClusterAdapter {
    async fn list_pods(&self, _namespace: &str) -> Result<Vec<Pod>, ClusterError> {
        Ok(vec![])
    }

    async fn delete_namespace(&self, namespace: &str) -> Result<(), ClusterError> {
        Err(ClusterError::NotFound(format!("namespace {}", namespace)))
    }

    async fn list_resources(
        &self,
        _kind: &ResourceKind,
        _namespace: Option<&str>,
    ) -> Result<Vec<Resource>, ClusterError> {
        Ok(vec![])
    }

    async fn get_resource(
        &self,
        kind: &ResourceKind,
        _namespace: Option<&str>,
        name: &str,
    ) -> Result<Resource, ClusterError> {
        Err(ClusterError::NotFound(format!("{} {}", kind, name)))
    }

    async fn update_resource(
        &self,
        kind: &ResourceKind,
        resource: &Resource,
    ) -> Result<Resource, ClusterError> {
        Err(ClusterError::NotFound(format!("{} {}", kind, resource.name)))
    }
}
