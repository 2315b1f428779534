// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pi_adapters::{ClusterCall, FailPoint, FakeClusterAdapter};
use pi_core::{PodPhase, Resource, ResourceKind};
use std::time::Duration;

const SYSTEM: &str = "kyma-system";

fn teardown(cluster: &FakeClusterAdapter) -> NamespaceTeardown<FakeClusterAdapter> {
    NamespaceTeardown::new(
        cluster.clone(),
        RetryPolicy::fixed(3, Duration::from_millis(100)),
        SYSTEM,
    )
}

fn names(namespaces: &[&str]) -> Vec<String> {
    namespaces.iter().map(|ns| ns.to_string()).collect()
}

fn brokers() -> ResourceKind {
    ResourceKind::new("servicecatalog.k8s.io", "v1beta1", "clusterservicebrokers")
}

fn secrets() -> ResourceKind {
    ResourceKind::new("", "v1", "secrets")
}

fn rules() -> ResourceKind {
    ResourceKind::new("oathkeeper.ory.sh", "v1alpha1", "rules")
}

fn deletes(cluster: &FakeClusterAdapter) -> Vec<String> {
    let mut deleted: Vec<String> = cluster
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            ClusterCall::DeleteNamespace { namespace } => Some(namespace),
            _ => None,
        })
        .collect();
    deleted.sort();
    deleted
}

#[tokio::test(start_paused = true)]
async fn failures_from_all_workers_are_aggregated() {
    let cluster = FakeClusterAdapter::new();
    for ns in ["a", "b", "c"] {
        cluster.add_namespace(ns);
    }
    cluster.fail(FailPoint::DeleteNamespace("b".to_string()), "X");
    cluster.fail(FailPoint::DeleteNamespace("c".to_string()), "Y");

    let err = teardown(&cluster)
        .teardown(&names(&["a", "b", "c"]))
        .await
        .unwrap_err();

    assert_eq!(err.failures.len(), 2);
    let message = err.to_string();
    assert!(message.contains('X'), "{}", message);
    assert!(message.contains('Y'), "{}", message);
    assert!(!cluster.has_namespace("a"));
    assert_eq!(deletes(&cluster), vec!["a", "b", "c"]);
}

#[tokio::test(start_paused = true)]
async fn absent_namespaces_and_resources_count_as_deleted() {
    let cluster = FakeClusterAdapter::new();
    cluster.remove_kind(&brokers());
    cluster.remove_kind(&rules());

    let result = teardown(&cluster)
        .teardown(&names(&[SYSTEM, "kyma-installer"]))
        .await;

    assert_eq!(result, Ok(()));
    assert_eq!(deletes(&cluster), vec!["kyma-installer", SYSTEM]);
}

#[tokio::test(start_paused = true)]
async fn teardown_twice_succeeds() {
    let cluster = FakeClusterAdapter::new();
    cluster.add_namespace("istio-system");
    let teardown = teardown(&cluster);

    assert_eq!(teardown.teardown(&names(&["istio-system"])).await, Ok(()));
    assert_eq!(teardown.teardown(&names(&["istio-system"])).await, Ok(()));
}

#[tokio::test(start_paused = true)]
async fn namespace_with_running_pods_is_skipped() {
    let cluster = FakeClusterAdapter::new();
    cluster.add_pod("busy", "worker-0", PodPhase::Running);
    cluster.add_pod("idle", "job-0", PodPhase::Succeeded);

    let result = teardown(&cluster).teardown(&names(&["busy", "idle"])).await;

    assert_eq!(result, Ok(()));
    assert!(cluster.has_namespace("busy"));
    assert!(!cluster.has_namespace("idle"));
    let busy_checks = cluster
        .calls()
        .into_iter()
        .filter(|call| {
            *call
                == ClusterCall::ListPods {
                    namespace: "busy".to_string(),
                }
        })
        .count();
    assert_eq!(busy_checks, 3);
}

#[tokio::test(start_paused = true)]
async fn namespace_is_deleted_once_pods_stop() {
    let cluster = FakeClusterAdapter::new();
    cluster.add_pod("draining", "worker-0", PodPhase::Running);
    cluster.stop_pods_after("draining", 2);

    let result = teardown(&cluster).teardown(&names(&["draining"])).await;

    assert_eq!(result, Ok(()));
    assert!(!cluster.has_namespace("draining"));
}

#[tokio::test(start_paused = true)]
async fn unreachable_precheck_is_reported() {
    let cluster = FakeClusterAdapter::new();
    cluster.add_namespace("istio-system");
    cluster.fail(
        FailPoint::ListPods("istio-system".to_string()),
        "connection refused",
    );

    let err = teardown(&cluster)
        .teardown(&names(&["istio-system"]))
        .await
        .unwrap_err();

    assert_eq!(
        err.failures,
        vec![TeardownFailure {
            namespace: "istio-system".to_string(),
            step: TeardownStep::Precheck,
            message: "api error: connection refused".to_string(),
        }]
    );
    assert!(cluster.has_namespace("istio-system"));
    assert!(deletes(&cluster).is_empty());
}

#[tokio::test(start_paused = true)]
async fn system_namespace_finalizers_are_cleared_before_delete() {
    let cluster = FakeClusterAdapter::new();
    cluster.add_namespace(SYSTEM);
    cluster.add_resource(&brokers(), Resource::new("helm-broker", None, &["catalog"]));
    cluster.add_resource(
        &secrets(),
        Resource::new(
            "serverless-registry-config-default",
            Some(SYSTEM),
            &["serverless.kyma-project.io/deletion-hook"],
        ),
    );
    cluster.add_resource(&rules(), Resource::new("rule-a", Some(SYSTEM), &["gc"]));
    cluster.add_resource(&rules(), Resource::new("rule-b", Some(SYSTEM), &[]));

    let result = teardown(&cluster).teardown(&names(&[SYSTEM])).await;

    assert_eq!(result, Ok(()));
    let calls = cluster.calls();
    let delete_at = calls
        .iter()
        .position(|call| matches!(call, ClusterCall::DeleteNamespace { .. }))
        .unwrap();
    let updated: Vec<(usize, String)> = calls
        .iter()
        .enumerate()
        .filter_map(|(i, call)| match call {
            ClusterCall::UpdateResource { name, finalizers, .. } => {
                assert!(finalizers.is_empty());
                Some((i, name.clone()))
            }
            _ => None,
        })
        .collect();

    // rule-b has no finalizers and is left alone
    assert_eq!(
        updated.iter().map(|(_, n)| n.as_str()).collect::<Vec<_>>(),
        vec!["helm-broker", "serverless-registry-config-default", "rule-a"]
    );
    assert!(updated.iter().all(|(i, _)| *i < delete_at));
    assert!(cluster.calls().contains(&ClusterCall::ListResources {
        kind: brokers(),
        namespace: None,
    }));
    assert!(cluster
        .get_stored_resource(&brokers(), None, "helm-broker")
        .unwrap()
        .finalizers
        .is_empty());
}

#[tokio::test(start_paused = true)]
async fn finalizer_failure_does_not_block_deletion() {
    let cluster = FakeClusterAdapter::new();
    cluster.add_namespace(SYSTEM);
    cluster.add_resource(&rules(), Resource::new("rule-a", Some(SYSTEM), &["gc"]));
    cluster.fail(FailPoint::UpdateResource(rules()), "conflict");

    let err = teardown(&cluster)
        .teardown(&names(&[SYSTEM]))
        .await
        .unwrap_err();

    assert_eq!(err.failures.len(), 1);
    assert_eq!(
        err.failures[0].step,
        TeardownStep::ClearFinalizers { kind: rules() }
    );
    assert!(!cluster.has_namespace(SYSTEM));
}

#[tokio::test(start_paused = true)]
async fn other_namespaces_skip_finalizer_clearing() {
    let cluster = FakeClusterAdapter::new();
    cluster.add_namespace("istio-system");

    teardown(&cluster)
        .teardown(&names(&["istio-system"]))
        .await
        .unwrap();

    assert_eq!(
        cluster.calls(),
        vec![
            ClusterCall::ListPods {
                namespace: "istio-system".to_string()
            },
            ClusterCall::DeleteNamespace {
                namespace: "istio-system".to_string()
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn custom_targets_replace_defaults() {
    let cluster = FakeClusterAdapter::new();
    cluster.add_namespace(SYSTEM);
    let teardown = teardown(&cluster).with_targets(vec![FinalizerTarget::all(
        rules(),
        pi_core::TargetScope::Namespace,
    )]);

    teardown.teardown(&names(&[SYSTEM])).await.unwrap();

    let listed: Vec<ResourceKind> = cluster
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            ClusterCall::ListResources { kind, .. } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(listed, vec![rules()]);
}

#[tokio::test]
async fn lost_aggregator_is_reported_as_failure() {
    let joined = tokio::spawn(async {
        if true {
            panic!("aggregator died");
        }
        Vec::<TeardownFailure>::new()
    })
    .await;

    let failures = collected_failures(joined, &names(&["a", "b"]));

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].namespace, "a,b");
    assert_eq!(failures[0].step, TeardownStep::Aggregate);
    assert!(failures[0].message.contains("panicked"), "{}", failures[0].message);
}

#[tokio::test]
async fn collected_failures_pass_through() {
    let failure = TeardownFailure {
        namespace: "istio-system".to_string(),
        step: TeardownStep::DeleteNamespace,
        message: "X".to_string(),
    };

    let failures = collected_failures(Ok(vec![failure.clone()]), &names(&["istio-system"]));

    assert_eq!(failures, vec![failure]);
}
