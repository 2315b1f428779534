// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deletion configuration
//!
//! Loaded from TOML. Durations use humantime notation (`20m`, `90s`).

use crate::budget::TimeoutBudget;
use crate::component::ComponentSpec;
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one uninstallation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletionConfig {
    /// When the running phase engine is asked to wind down
    #[serde(with = "humantime_serde")]
    pub cancel_timeout: Duration,
    /// When the orchestrator stops waiting for the phase engine
    #[serde(with = "humantime_serde")]
    pub quit_timeout: Duration,
    /// Concurrent component removals per phase
    pub workers: usize,
    /// Namespace whose stuck finalizers are cleared before deletion
    pub system_namespace: String,
    /// Namespace left by the deprecated installer, always torn down
    pub legacy_namespace: String,
    /// Retry policy for the namespace liveness pre-check
    pub retry: RetryPolicy,
}

impl Default for DeletionConfig {
    fn default() -> Self {
        Self {
            cancel_timeout: Duration::from_secs(20 * 60),
            quit_timeout: Duration::from_secs(25 * 60),
            workers: 4,
            system_namespace: "kyma-system".to_string(),
            legacy_namespace: "kyma-installer".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl DeletionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path)?)
    }

    /// Check the invariants a run relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cancel_timeout >= self.quit_timeout {
            return Err(ConfigError::Invalid(format!(
                "cancel_timeout ({:?}) must be shorter than quit_timeout ({:?})",
                self.cancel_timeout, self.quit_timeout
            )));
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.retry.attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.attempts must be at least 1".into(),
            ));
        }
        if self.system_namespace.is_empty() || self.legacy_namespace.is_empty() {
            return Err(ConfigError::Invalid("namespace names must not be empty".into()));
        }
        Ok(())
    }

    /// Full budget for the first phase of a run
    pub fn budget(&self) -> TimeoutBudget {
        TimeoutBudget::new(self.cancel_timeout, self.quit_timeout)
    }
}

/// Components to remove, split by phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentList {
    pub prerequisites: Vec<ComponentSpec>,
    pub components: Vec<ComponentSpec>,
}

impl ComponentList {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let list: Self = toml::from_str(content)?;
        if let Some(spec) = list
            .prerequisites
            .iter()
            .chain(&list.components)
            .find(|c| c.name.is_empty() || c.namespace.is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "component entries need a name and a namespace: {:?}",
                spec
            )));
        }
        Ok(list)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path)?)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
