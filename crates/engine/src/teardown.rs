// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel namespace teardown
//!
//! Each namespace is pre-checked for running pods, then handed to its own
//! worker. Workers report failures over one channel to a single aggregator,
//! so a failing namespace never stops its siblings.

use crate::error::{TeardownError, TeardownFailure, TeardownStep};
use crate::retry::retry;
use pi_adapters::{ClusterAdapter, ClusterError};
use pi_core::{stuck_finalizer_targets, FinalizerTarget, RetryPolicy};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinError;

/// Why a liveness pre-check attempt failed
enum Liveness {
    Running(usize),
    Unreachable(ClusterError),
}

/// Removes the namespaces an uninstallation left behind
#[derive(Clone)]
pub struct NamespaceTeardown<K> {
    cluster: K,
    retry: RetryPolicy,
    system_namespace: String,
    targets: Arc<Vec<FinalizerTarget>>,
}

impl<K: ClusterAdapter> NamespaceTeardown<K> {
    pub fn new(cluster: K, retry: RetryPolicy, system_namespace: impl Into<String>) -> Self {
        Self {
            cluster,
            retry,
            system_namespace: system_namespace.into(),
            targets: Arc::new(stuck_finalizer_targets()),
        }
    }

    /// Replace the resource kinds cleared in the system namespace
    pub fn with_targets(mut self, targets: Vec<FinalizerTarget>) -> Self {
        self.targets = Arc::new(targets);
        self
    }

    /// Delete `namespaces`, returning once every worker finished.
    ///
    /// Namespaces that still run pods after the retry policy is exhausted
    /// are skipped. Missing namespaces and resources count as deleted.
    pub async fn teardown(&self, namespaces: &[String]) -> Result<(), TeardownError> {
        let (failures_tx, mut failures_rx) = mpsc::unbounded_channel::<TeardownFailure>();
        let aggregator = tokio::spawn(async move {
            let mut failures = Vec::new();
            while let Some(failure) = failures_rx.recv().await {
                tracing::warn!(
                    namespace = %failure.namespace,
                    step = %failure.step,
                    error = %failure.message,
                    "namespace teardown step failed"
                );
                failures.push(failure);
            }
            failures
        });

        let mut workers = Vec::new();
        for namespace in namespaces {
            let reporter = Reporter {
                namespace: namespace.clone(),
                tx: failures_tx.clone(),
            };
            match self.precheck(namespace).await {
                Ok(()) => {
                    let worker = NamespaceWorker {
                        cluster: self.cluster.clone(),
                        targets: if *namespace == self.system_namespace {
                            Arc::clone(&self.targets)
                        } else {
                            Arc::new(Vec::new())
                        },
                        reporter,
                    };
                    workers.push((namespace.clone(), tokio::spawn(worker.run())));
                }
                Err(Liveness::Running(running)) => {
                    tracing::info!(
                        %namespace,
                        running,
                        "pods still running, skipping namespace"
                    );
                }
                Err(Liveness::Unreachable(e)) => {
                    reporter.report(TeardownStep::Precheck, &e);
                }
            }
        }

        for (namespace, worker) in workers {
            if let Err(e) = worker.await {
                let _ = failures_tx.send(TeardownFailure {
                    namespace,
                    step: TeardownStep::Worker,
                    message: e.to_string(),
                });
            }
        }
        drop(failures_tx);

        let mut failures = collected_failures(aggregator.await, namespaces);
        if failures.is_empty() {
            tracing::info!(count = namespaces.len(), "namespace teardown finished");
            return Ok(());
        }
        failures.sort_by(|a, b| a.namespace.cmp(&b.namespace));
        Err(TeardownError { failures })
    }

    async fn precheck(&self, namespace: &str) -> Result<(), Liveness> {
        retry(&self.retry, |attempt| async move {
            let pods = match self.cluster.list_pods(namespace).await {
                Ok(pods) => pods,
                Err(e) => return Err(Liveness::Unreachable(e)),
            };
            let running = pods.iter().filter(|pod| pod.is_running()).count();
            if running > 0 {
                tracing::debug!(namespace, attempt, running, "waiting for pods to stop");
                return Err(Liveness::Running(running));
            }
            Ok(())
        })
        .await
    }
}

/// Failures gathered by the aggregator task, or one failure covering every
/// namespace when the aggregator itself died
fn collected_failures(
    joined: Result<Vec<TeardownFailure>, JoinError>,
    namespaces: &[String],
) -> Vec<TeardownFailure> {
    match joined {
        Ok(failures) => failures,
        Err(e) => {
            tracing::error!(error = %e, "teardown aggregator failed");
            vec![TeardownFailure {
                namespace: namespaces.join(","),
                step: TeardownStep::Aggregate,
                message: e.to_string(),
            }]
        }
    }
}

/// Sends one namespace's failures to the aggregator
struct Reporter {
    namespace: String,
    tx: mpsc::UnboundedSender<TeardownFailure>,
}

impl Reporter {
    fn report(&self, step: TeardownStep, error: &ClusterError) {
        // Receiver lives until every worker finished
        let _ = self.tx.send(TeardownFailure {
            namespace: self.namespace.clone(),
            step,
            message: error.to_string(),
        });
    }
}

struct NamespaceWorker<K> {
    cluster: K,
    /// Kinds to clear first; empty outside the system namespace
    targets: Arc<Vec<FinalizerTarget>>,
    reporter: Reporter,
}

impl<K: ClusterAdapter> NamespaceWorker<K> {
    async fn run(self) {
        let namespace = self.reporter.namespace.as_str();

        for target in self.targets.iter() {
            self.clear_finalizers(target).await;
        }

        match self.cluster.delete_namespace(namespace).await {
            Ok(()) => tracing::info!(namespace, "namespace deleted"),
            Err(e) if e.is_not_found() => tracing::info!(namespace, "namespace already gone"),
            Err(e) => self.reporter.report(TeardownStep::DeleteNamespace, &e),
        }
    }

    /// Empty the finalizer list of every instance of `target`
    async fn clear_finalizers(&self, target: &FinalizerTarget) {
        let step = || TeardownStep::ClearFinalizers {
            kind: target.kind.clone(),
        };
        let namespace = target.namespace_in(&self.reporter.namespace);

        let fetched = match &target.name {
            Some(name) => self
                .cluster
                .get_resource(&target.kind, namespace, name)
                .await
                .map(|resource| vec![resource]),
            None => self.cluster.list_resources(&target.kind, namespace).await,
        };
        let resources = match fetched {
            Ok(resources) => resources,
            Err(e) if e.is_not_found() => return,
            Err(e) => {
                self.reporter.report(step(), &e);
                return;
            }
        };

        for mut resource in resources {
            if resource.finalizers.is_empty() {
                continue;
            }
            resource.finalizers.clear();
            match self.cluster.update_resource(&target.kind, &resource).await {
                Ok(_) => tracing::info!(
                    kind = %target.kind,
                    name = %resource.name,
                    "finalizers cleared"
                ),
                Err(e) if e.is_not_found() => {}
                Err(e) => self.reporter.report(step(), &e),
            }
        }
    }
}

#[cfg(test)]
#[path = "teardown_tests.rs"]
mod tests;
