// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-phase uninstallation
//!
//! Components are removed first, then the prerequisites they depend on,
//! then the namespaces both left behind. A failed phase ends the run.

use crate::error::DeletionError;
use crate::pool::WorkerPool;
use crate::supervisor::Supervisor;
use crate::teardown::NamespaceTeardown;
use pi_adapters::{ClusterAdapter, ComponentUninstaller, MetadataProvider, PhaseEngine, ProgressSink};
use pi_core::{CancelSignal, Clock, ComponentList, DeletionConfig, Phase};

/// Collaborators of an uninstallation run
pub struct DeletionDeps<K, E, M, P> {
    pub cluster: K,
    /// Engine for the first phase
    pub components: E,
    /// Engine for the second phase
    pub prerequisites: E,
    pub metadata: M,
    pub progress: P,
}

impl<K, U, M, P> DeletionDeps<K, WorkerPool<U>, M, P>
where
    U: ComponentUninstaller,
{
    /// Deps that remove each phase of `list` with a worker pool
    pub fn with_worker_pools(
        cluster: K,
        uninstaller: U,
        list: ComponentList,
        workers: usize,
        metadata: M,
        progress: P,
    ) -> Self {
        Self {
            cluster,
            components: WorkerPool::new(uninstaller.clone(), list.components, workers),
            prerequisites: WorkerPool::new(uninstaller, list.prerequisites, workers),
            metadata,
            progress,
        }
    }
}

/// Orchestrates one platform uninstallation
pub struct Deletion<K, E, M, P, C: Clock> {
    components: E,
    prerequisites: E,
    metadata: M,
    supervisor: Supervisor<P>,
    teardown: NamespaceTeardown<K>,
    config: DeletionConfig,
    clock: C,
}

impl<K, E, M, P, C> Deletion<K, E, M, P, C>
where
    K: ClusterAdapter,
    E: PhaseEngine,
    M: MetadataProvider,
    P: ProgressSink,
    C: Clock,
{
    /// Create an orchestrator, rejecting invalid configuration
    pub fn new(
        deps: DeletionDeps<K, E, M, P>,
        config: DeletionConfig,
        clock: C,
    ) -> Result<Self, DeletionError> {
        config.validate()?;
        Ok(Self {
            components: deps.components,
            prerequisites: deps.prerequisites,
            metadata: deps.metadata,
            supervisor: Supervisor::new(deps.progress),
            teardown: NamespaceTeardown::new(
                deps.cluster,
                config.retry.clone(),
                config.system_namespace.clone(),
            ),
            config,
            clock,
        })
    }

    /// Run both phases and tear down the namespaces they used
    pub async fn start_uninstallation(&self) -> Result<(), DeletionError> {
        let namespaces = self.namespaces().await?;
        let cancel = CancelSignal::new();
        let budget = self.config.budget();

        let started = self.clock.now();
        self.supervisor
            .run(Phase::Components, &self.components, &cancel, budget)
            .await?;

        let elapsed = self.clock.elapsed_since(started);
        let remaining = budget.remaining(elapsed);
        tracing::info!(
            elapsed_ms = elapsed.as_millis() as u64,
            cancel_ms = remaining.cancel.as_millis() as u64,
            quit_ms = remaining.quit.as_millis() as u64,
            "components removed, rebalanced budget for prerequisites"
        );
        self.supervisor
            .run(Phase::Prerequisites, &self.prerequisites, &cancel, remaining)
            .await?;

        tracing::info!(count = namespaces.len(), "tearing down namespaces");
        self.teardown.teardown(&namespaces).await?;
        Ok(())
    }

    async fn namespaces(&self) -> Result<Vec<String>, DeletionError> {
        let mut namespaces = self.metadata.namespaces().await?;
        namespaces.push(self.config.legacy_namespace.clone());
        tracing::debug!(?namespaces, "namespaces to tear down");
        Ok(namespaces)
    }
}

#[cfg(test)]
#[path = "deletion_tests.rs"]
mod tests;
