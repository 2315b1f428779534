// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker-pool phase engine

use async_trait::async_trait;
use pi_adapters::{ComponentUninstaller, EngineError, PhaseEngine};
use pi_core::{CancelSignal, Component, ComponentSpec};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Removes a component list with a bounded number of concurrent uninstalls
#[derive(Clone)]
pub struct WorkerPool<U> {
    uninstaller: U,
    components: Arc<Vec<ComponentSpec>>,
    workers: usize,
}

impl<U: ComponentUninstaller> WorkerPool<U> {
    pub fn new(uninstaller: U, components: Vec<ComponentSpec>, workers: usize) -> Self {
        Self {
            uninstaller,
            components: Arc::new(components),
            workers,
        }
    }

    pub fn components(&self) -> &[ComponentSpec] {
        &self.components
    }

    async fn dispatch(self, cancel: CancelSignal, tx: mpsc::Sender<Component>) {
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut in_flight = JoinSet::new();

        for spec in self.components.iter() {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let uninstaller = self.uninstaller.clone();
            let spec = spec.clone();
            let tx = tx.clone();
            in_flight.spawn(async move {
                let status = match uninstaller.uninstall(&spec).await {
                    Ok(()) => Component::success(&spec.name, &spec.namespace),
                    Err(e) => Component::failed(&spec.name, &spec.namespace, e.to_string()),
                };
                drop(permit);
                // Receiver gone means the supervisor stopped listening
                let _ = tx.send(status).await;
            });
        }

        if cancel.is_cancelled() {
            tracing::info!(
                in_flight = in_flight.len(),
                "cancelled, waiting for running uninstalls"
            );
        }
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "component uninstall task failed");
            }
        }
    }
}

#[async_trait]
impl<U: ComponentUninstaller> PhaseEngine for WorkerPool<U> {
    async fn uninstall(
        &self,
        cancel: CancelSignal,
    ) -> Result<mpsc::Receiver<Component>, EngineError> {
        if self.workers == 0 {
            return Err(EngineError::StartFailed(
                "worker pool needs at least one worker".to_string(),
            ));
        }

        let (tx, rx) = mpsc::channel(self.components.len().max(1));
        tokio::spawn(self.clone().dispatch(cancel, tx));
        Ok(rx)
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
