// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster resource model used by namespace teardown

use std::fmt;

/// Lifecycle phase of a pod
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

/// The part of a pod that teardown cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pod {
    pub name: String,
    pub phase: PodPhase,
}

impl Pod {
    pub fn new(name: impl Into<String>, phase: PodPhase) -> Self {
        Self {
            name: name.into(),
            phase,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == PodPhase::Running
    }
}

/// A group/version/resource triple identifying an API resource type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKind {
    /// API group, empty for the core group
    pub group: String,
    pub version: String,
    /// Plural resource name, e.g. `secrets`
    pub plural: String,
}

impl ResourceKind {
    pub fn new(group: &str, version: &str, plural: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            plural: plural.to_string(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.plural)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.plural)
        }
    }
}

/// Metadata of a resource instance relevant to finalizer clearing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub name: String,
    /// `None` for cluster-scoped resources
    pub namespace: Option<String>,
    pub finalizers: Vec<String>,
}

impl Resource {
    pub fn new(name: impl Into<String>, namespace: Option<&str>, finalizers: &[&str]) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            finalizers: finalizers.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Where a finalizer target lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetScope {
    /// Cluster-scoped kind
    Cluster,
    /// Namespaced kind, looked up in the namespace being torn down
    Namespace,
}

/// A resource kind whose finalizers are cleared before the system namespace
/// is deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizerTarget {
    pub kind: ResourceKind,
    pub scope: TargetScope,
    /// Single named instance; all instances when `None`
    pub name: Option<String>,
}

impl FinalizerTarget {
    pub fn all(kind: ResourceKind, scope: TargetScope) -> Self {
        Self {
            kind,
            scope,
            name: None,
        }
    }

    pub fn named(kind: ResourceKind, scope: TargetScope, name: &str) -> Self {
        Self {
            kind,
            scope,
            name: Some(name.to_string()),
        }
    }

    /// Namespace to query for this target when tearing down `namespace`
    pub fn namespace_in<'a>(&self, namespace: &'a str) -> Option<&'a str> {
        match self.scope {
            TargetScope::Cluster => None,
            TargetScope::Namespace => Some(namespace),
        }
    }
}

/// Resources known to leave finalizers behind that block namespace deletion.
///
/// Cleared in this order.
pub fn stuck_finalizer_targets() -> Vec<FinalizerTarget> {
    vec![
        FinalizerTarget::all(
            ResourceKind::new("servicecatalog.k8s.io", "v1beta1", "clusterservicebrokers"),
            TargetScope::Cluster,
        ),
        FinalizerTarget::all(
            ResourceKind::new("servicecatalog.k8s.io", "v1beta1", "servicebrokers"),
            TargetScope::Namespace,
        ),
        FinalizerTarget::named(
            ResourceKind::new("", "v1", "secrets"),
            TargetScope::Namespace,
            "serverless-registry-config-default",
        ),
        FinalizerTarget::all(
            ResourceKind::new("oathkeeper.ory.sh", "v1alpha1", "rules"),
            TargetScope::Namespace,
        ),
    ]
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
