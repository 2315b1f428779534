// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the uninstallation engine

use pi_adapters::{EngineError, MetadataError};
use pi_core::{ConfigError, Phase, ResourceKind};
use std::fmt;
use thiserror::Error;

/// A supervised phase run that did not finish cleanly
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhaseError {
    #[error("{phase}: uninstallation failed due to errors in {failed} component(s)")]
    ComponentFailure { phase: Phase, failed: usize },
    #[error("{phase}: uninstallation failed due to the timeout")]
    Timeout { phase: Phase },
    #[error("{phase}: force quit: uninstallation failed due to the timeout")]
    ForceQuit { phase: Phase },
    #[error("{phase}: {source}")]
    Engine {
        phase: Phase,
        #[source]
        source: EngineError,
    },
}

impl PhaseError {
    pub fn phase(&self) -> Phase {
        match self {
            PhaseError::ComponentFailure { phase, .. }
            | PhaseError::Timeout { phase }
            | PhaseError::ForceQuit { phase }
            | PhaseError::Engine { phase, .. } => *phase,
        }
    }
}

/// Step of a namespace teardown that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeardownStep {
    /// Liveness pre-check could not query the cluster
    Precheck,
    /// Clearing finalizers of a stuck resource kind
    ClearFinalizers { kind: ResourceKind },
    DeleteNamespace,
    /// The namespace worker died
    Worker,
    /// Collecting worker failures failed; they are lost
    Aggregate,
}

impl fmt::Display for TeardownStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeardownStep::Precheck => f.write_str("pre-check"),
            TeardownStep::ClearFinalizers { kind } => write!(f, "clear finalizers of {}", kind),
            TeardownStep::DeleteNamespace => f.write_str("delete namespace"),
            TeardownStep::Worker => f.write_str("worker"),
            TeardownStep::Aggregate => f.write_str("collect failures"),
        }
    }
}

/// One failed step for one namespace
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("namespace {namespace}: {step}: {message}")]
pub struct TeardownFailure {
    pub namespace: String,
    pub step: TeardownStep,
    pub message: String,
}

/// Every failure collected during one namespace teardown
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("namespace teardown failed: {}", join_failures(.failures))]
pub struct TeardownError {
    pub failures: Vec<TeardownFailure>,
}

fn join_failures(failures: &[TeardownFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Top-level result of an uninstallation run
#[derive(Debug, Error)]
pub enum DeletionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Phase(#[from] PhaseError),
    #[error(transparent)]
    Teardown(#[from] TeardownError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
