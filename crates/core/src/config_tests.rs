// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::retry::Backoff;
use tempfile::tempdir;

#[test]
fn empty_config_uses_defaults() {
    let config = DeletionConfig::from_toml_str("").unwrap();
    assert_eq!(config, DeletionConfig::default());
    assert_eq!(config.budget().cancel, Duration::from_secs(20 * 60));
    assert_eq!(config.budget().quit, Duration::from_secs(25 * 60));
}

#[test]
fn parses_humantime_durations() {
    let config = DeletionConfig::from_toml_str(
        r#"
cancel_timeout = "10m"
quit_timeout = "12m 30s"
workers = 8
system_namespace = "platform-system"

[retry]
attempts = 5
delay = "2s"
backoff = "fixed"
max_delay = "10s"
"#,
    )
    .unwrap();

    assert_eq!(config.cancel_timeout, Duration::from_secs(600));
    assert_eq!(config.quit_timeout, Duration::from_secs(750));
    assert_eq!(config.workers, 8);
    assert_eq!(config.system_namespace, "platform-system");
    assert_eq!(config.legacy_namespace, "kyma-installer");
    assert_eq!(config.retry.attempts, 5);
    assert_eq!(config.retry.delay, Duration::from_secs(2));
    assert_eq!(config.retry.backoff, Backoff::Fixed);
    assert_eq!(config.retry.max_delay, Some(Duration::from_secs(10)));
}

#[test]
fn rejects_cancel_not_before_quit() {
    let result = DeletionConfig::from_toml_str(
        r#"
cancel_timeout = "10m"
quit_timeout = "10m"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("cancel_timeout")));
}

#[test]
fn rejects_zero_workers_and_attempts() {
    let config = DeletionConfig {
        workers: 0,
        ..DeletionConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = DeletionConfig::default();
    config.retry.attempts = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn rejects_malformed_toml() {
    let result = DeletionConfig::from_toml_str("cancel_timeout = \"soon\"");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let result = DeletionConfig::load(&path);

    assert!(matches!(result, Err(ConfigError::Read { path: p, .. }) if p == path));
}

#[test]
fn loads_component_list_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("components.toml");
    std::fs::write(
        &path,
        r#"
[[prerequisites]]
name = "cluster-essentials"
namespace = "kyma-system"

[[components]]
name = "serverless"
namespace = "kyma-system"

[[components]]
name = "istio"
namespace = "istio-system"
"#,
    )
    .unwrap();

    let list = ComponentList::load(&path).unwrap();

    assert_eq!(
        list.prerequisites,
        vec![ComponentSpec::new("cluster-essentials", "kyma-system")]
    );
    assert_eq!(list.components.len(), 2);
    assert_eq!(list.components[1].namespace, "istio-system");
}

#[test]
fn component_list_requires_namespace() {
    let result = ComponentList::from_toml_str(
        r#"
[[components]]
name = "serverless"
namespace = ""
"#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}
