// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Components and their reported status

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Status of a single component as reported by a phase engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentStatus {
    Pending,
    InProgress,
    Success,
    Error,
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentStatus::Pending => "pending",
            ComponentStatus::InProgress => "in-progress",
            ComponentStatus::Success => "success",
            ComponentStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// A deployable unit to be removed, as listed in the component list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    pub namespace: String,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// A status event for one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub namespace: String,
    pub status: ComponentStatus,
    /// Failure detail, set when `status` is `Error`
    pub error: Option<String>,
}

impl Component {
    pub fn new(spec: &ComponentSpec, status: ComponentStatus) -> Self {
        Self {
            name: spec.name.clone(),
            namespace: spec.namespace.clone(),
            status,
            error: None,
        }
    }

    pub fn success(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            status: ComponentStatus::Success,
            error: None,
        }
    }

    pub fn failed(
        name: impl Into<String>,
        namespace: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            status: ComponentStatus::Error,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ComponentStatus::Error
    }
}

/// Last seen status per component name, kept for end-of-run diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMap {
    statuses: HashMap<String, ComponentStatus>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status, replacing any earlier one for the same component
    pub fn record(&mut self, component: &Component) {
        self.statuses
            .insert(component.name.clone(), component.status);
    }

    pub fn get(&self, name: &str) -> Option<ComponentStatus> {
        self.statuses.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Entries sorted by component name
    pub fn sorted(&self) -> Vec<(&str, ComponentStatus)> {
        let mut entries: Vec<_> = self
            .statuses
            .iter()
            .map(|(name, status)| (name.as_str(), *status))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
