// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::cluster::{ClusterAdapter, ClusterError};
use crate::component::{ComponentError, ComponentUninstaller};
use crate::engine::{EngineError, PhaseEngine};
use async_trait::async_trait;
use pi_core::{CancelSignal, Component, ComponentSpec, Pod, Resource, ResourceKind};
use tokio::sync::mpsc;
use tracing::Instrument;

/// Wrapper that adds tracing to any ClusterAdapter
#[derive(Clone)]
pub struct TracedClusterAdapter<K> {
    inner: K,
}

impl<K> TracedClusterAdapter<K> {
    pub fn new(inner: K) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<K: ClusterAdapter> ClusterAdapter for TracedClusterAdapter<K> {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, ClusterError> {
        let result = self.inner.list_pods(namespace).await;
        tracing::trace!(
            namespace,
            count = result.as_ref().map(|pods| pods.len()).ok(),
            "listed pods"
        );
        result
    }

    async fn delete_namespace(&self, namespace: &str) -> Result<(), ClusterError> {
        let span = tracing::info_span!("cluster.delete_namespace", namespace);
        async {
            // Precondition: an empty name would address the collection
            if namespace.is_empty() {
                tracing::error!("namespace name is empty");
                return Err(ClusterError::Api("namespace name is empty".to_string()));
            }

            tracing::info!("deleting namespace");
            let start = std::time::Instant::now();
            let result = self.inner.delete_namespace(namespace).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "namespace deleted"
                ),
                // Already gone is fine for callers
                Err(e) if e.is_not_found() => tracing::info!(error = %e, "namespace not found"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "delete failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn list_resources(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<Resource>, ClusterError> {
        let result = self.inner.list_resources(kind, namespace).await;
        tracing::debug!(
            %kind,
            namespace,
            count = result.as_ref().map(|r| r.len()).ok(),
            "listed resources"
        );
        result
    }

    async fn get_resource(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Resource, ClusterError> {
        let result = self.inner.get_resource(kind, namespace, name).await;
        tracing::trace!(%kind, namespace, name, found = result.is_ok(), "fetched resource");
        result
    }

    async fn update_resource(
        &self,
        kind: &ResourceKind,
        resource: &Resource,
    ) -> Result<Resource, ClusterError> {
        let span = tracing::info_span!(
            "cluster.update_resource",
            %kind,
            name = %resource.name,
            namespace = resource.namespace.as_deref(),
        );
        async {
            tracing::debug!(finalizers = resource.finalizers.len(), "updating");
            let result = self.inner.update_resource(kind, resource).await;
            match &result {
                Ok(_) => tracing::info!("resource updated"),
                Err(e) => tracing::warn!(error = %e, "update failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any PhaseEngine
#[derive(Clone)]
pub struct TracedPhaseEngine<E> {
    name: &'static str,
    inner: E,
}

impl<E> TracedPhaseEngine<E> {
    pub fn new(name: &'static str, inner: E) -> Self {
        Self { name, inner }
    }
}

#[async_trait]
impl<E: PhaseEngine> PhaseEngine for TracedPhaseEngine<E> {
    async fn uninstall(
        &self,
        cancel: CancelSignal,
    ) -> Result<mpsc::Receiver<Component>, EngineError> {
        let span = tracing::info_span!("engine.uninstall", engine = self.name);
        async {
            tracing::info!(cancelled = cancel.is_cancelled(), "starting");
            let result = self.inner.uninstall(cancel).await;
            match &result {
                Ok(_) => tracing::info!("engine started"),
                Err(e) => tracing::error!(error = %e, "engine start failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any ComponentUninstaller
#[derive(Clone)]
pub struct TracedComponentUninstaller<U> {
    inner: U,
}

impl<U> TracedComponentUninstaller<U> {
    pub fn new(inner: U) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<U: ComponentUninstaller> ComponentUninstaller for TracedComponentUninstaller<U> {
    async fn uninstall(&self, component: &ComponentSpec) -> Result<(), ComponentError> {
        let span = tracing::info_span!(
            "component.uninstall",
            component = %component.name,
            namespace = %component.namespace,
        );
        async {
            tracing::info!("uninstalling");
            let start = std::time::Instant::now();
            let result = self.inner.uninstall(component).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "component removed"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "uninstall failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
