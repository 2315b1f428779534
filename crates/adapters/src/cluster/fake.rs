// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake cluster adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClusterAdapter, ClusterError};
use async_trait::async_trait;
use pi_core::{Pod, PodPhase, Resource, ResourceKind};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Recorded cluster call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterCall {
    ListPods {
        namespace: String,
    },
    DeleteNamespace {
        namespace: String,
    },
    ListResources {
        kind: ResourceKind,
        namespace: Option<String>,
    },
    GetResource {
        kind: ResourceKind,
        namespace: Option<String>,
        name: String,
    },
    UpdateResource {
        kind: ResourceKind,
        namespace: Option<String>,
        name: String,
        finalizers: Vec<String>,
    },
}

/// Operation that can be made to fail with an API error
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailPoint {
    ListPods(String),
    DeleteNamespace(String),
    ListResources(ResourceKind),
    GetResource(ResourceKind),
    UpdateResource(ResourceKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResourceKey {
    kind: ResourceKind,
    namespace: Option<String>,
    name: String,
}

#[derive(Default)]
struct FakeClusterState {
    namespaces: BTreeSet<String>,
    pods: HashMap<String, Vec<Pod>>,
    /// Remaining pod listings before running pods in a namespace terminate
    pods_stop_after: HashMap<String, u32>,
    resources: HashMap<ResourceKey, Resource>,
    missing_kinds: HashSet<ResourceKind>,
    failures: HashMap<FailPoint, String>,
}

/// Fake in-memory cluster for testing
#[derive(Clone, Default)]
pub struct FakeClusterAdapter {
    state: Arc<Mutex<FakeClusterState>>,
    calls: Arc<Mutex<Vec<ClusterCall>>>,
}

impl FakeClusterAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ClusterCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Namespaces currently present
    pub fn namespaces(&self) -> Vec<String> {
        self.lock().namespaces.iter().cloned().collect()
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.lock().namespaces.contains(namespace)
    }

    pub fn add_namespace(&self, namespace: &str) {
        self.lock().namespaces.insert(namespace.to_string());
    }

    /// Add a pod (and its namespace)
    pub fn add_pod(&self, namespace: &str, name: &str, phase: PodPhase) {
        let mut state = self.lock();
        state.namespaces.insert(namespace.to_string());
        state
            .pods
            .entry(namespace.to_string())
            .or_default()
            .push(Pod::new(name, phase));
    }

    /// Running pods in `namespace` terminate after `listings` pod listings
    pub fn stop_pods_after(&self, namespace: &str, listings: u32) {
        self.lock()
            .pods_stop_after
            .insert(namespace.to_string(), listings);
    }

    pub fn add_resource(&self, kind: &ResourceKind, resource: Resource) {
        let key = ResourceKey {
            kind: kind.clone(),
            namespace: resource.namespace.clone(),
            name: resource.name.clone(),
        };
        self.lock().resources.insert(key, resource);
    }

    pub fn get_stored_resource(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
        name: &str,
    ) -> Option<Resource> {
        self.lock()
            .resources
            .get(&ResourceKey {
                kind: kind.clone(),
                namespace: namespace.map(str::to_string),
                name: name.to_string(),
            })
            .cloned()
    }

    /// Make a kind unknown to the cluster, as if its CRD was never installed
    pub fn remove_kind(&self, kind: &ResourceKind) {
        self.lock().missing_kinds.insert(kind.clone());
    }

    /// Make an operation fail with an API error
    pub fn fail(&self, point: FailPoint, message: &str) {
        self.lock().failures.insert(point, message.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeClusterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: ClusterCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl FakeClusterState {
    fn check(&self, point: &FailPoint) -> Result<(), ClusterError> {
        match self.failures.get(point) {
            Some(message) => Err(ClusterError::Api(message.clone())),
            None => Ok(()),
        }
    }

    fn check_kind(&self, kind: &ResourceKind) -> Result<(), ClusterError> {
        if self.missing_kinds.contains(kind) {
            return Err(ClusterError::NotFound(format!("resource type {}", kind)));
        }
        Ok(())
    }
}

#[async_trait]
impl ClusterAdapter for FakeClusterAdapter {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, ClusterError> {
        self.record(ClusterCall::ListPods {
            namespace: namespace.to_string(),
        });

        let mut state = self.lock();
        state.check(&FailPoint::ListPods(namespace.to_string()))?;

        let pods = state.pods.get(namespace).cloned().unwrap_or_default();

        if let Some(remaining) = state.pods_stop_after.get_mut(namespace) {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                state.pods_stop_after.remove(namespace);
                if let Some(pods) = state.pods.get_mut(namespace) {
                    for pod in pods.iter_mut().filter(|p| p.is_running()) {
                        pod.phase = PodPhase::Succeeded;
                    }
                }
            }
        }

        Ok(pods)
    }

    async fn delete_namespace(&self, namespace: &str) -> Result<(), ClusterError> {
        self.record(ClusterCall::DeleteNamespace {
            namespace: namespace.to_string(),
        });

        let mut state = self.lock();
        state.check(&FailPoint::DeleteNamespace(namespace.to_string()))?;

        if !state.namespaces.remove(namespace) {
            return Err(ClusterError::NotFound(format!("namespace {}", namespace)));
        }
        state.pods.remove(namespace);
        state
            .resources
            .retain(|key, _| key.namespace.as_deref() != Some(namespace));
        Ok(())
    }

    async fn list_resources(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<Resource>, ClusterError> {
        self.record(ClusterCall::ListResources {
            kind: kind.clone(),
            namespace: namespace.map(str::to_string),
        });

        let state = self.lock();
        state.check(&FailPoint::ListResources(kind.clone()))?;
        state.check_kind(kind)?;

        let mut resources: Vec<Resource> = state
            .resources
            .iter()
            .filter(|(key, _)| &key.kind == kind && key.namespace.as_deref() == namespace)
            .map(|(_, resource)| resource.clone())
            .collect();
        resources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(resources)
    }

    async fn get_resource(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Resource, ClusterError> {
        self.record(ClusterCall::GetResource {
            kind: kind.clone(),
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        });

        let state = self.lock();
        state.check(&FailPoint::GetResource(kind.clone()))?;
        state.check_kind(kind)?;

        state
            .resources
            .get(&ResourceKey {
                kind: kind.clone(),
                namespace: namespace.map(str::to_string),
                name: name.to_string(),
            })
            .cloned()
            .ok_or_else(|| ClusterError::NotFound(format!("{} {}", kind, name)))
    }

    async fn update_resource(
        &self,
        kind: &ResourceKind,
        resource: &Resource,
    ) -> Result<Resource, ClusterError> {
        self.record(ClusterCall::UpdateResource {
            kind: kind.clone(),
            namespace: resource.namespace.clone(),
            name: resource.name.clone(),
            finalizers: resource.finalizers.clone(),
        });

        let mut state = self.lock();
        state.check(&FailPoint::UpdateResource(kind.clone()))?;

        let key = ResourceKey {
            kind: kind.clone(),
            namespace: resource.namespace.clone(),
            name: resource.name.clone(),
        };
        match state.resources.get_mut(&key) {
            Some(stored) => {
                stored.finalizers = resource.finalizers.clone();
                Ok(stored.clone())
            }
            None => Err(ClusterError::NotFound(format!(
                "{} {}",
                kind, resource.name
            ))),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
