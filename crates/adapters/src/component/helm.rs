// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helm release uninstaller

use super::{ComponentError, ComponentUninstaller};
use async_trait::async_trait;
use pi_core::ComponentSpec;
use std::path::PathBuf;
use tokio::process::Command;

/// Removes components by uninstalling their helm release
#[derive(Clone, Debug, Default)]
pub struct HelmUninstaller {
    kubeconfig: Option<PathBuf>,
}

impl HelmUninstaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kubeconfig(kubeconfig: PathBuf) -> Self {
        Self {
            kubeconfig: Some(kubeconfig),
        }
    }
}

/// Whether helm's stderr reports that the release does not exist
fn is_missing_release(stderr: &str) -> bool {
    stderr.contains("release: not found")
}

#[async_trait]
impl ComponentUninstaller for HelmUninstaller {
    async fn uninstall(&self, component: &ComponentSpec) -> Result<(), ComponentError> {
        let mut cmd = Command::new("helm");
        cmd.arg("uninstall")
            .arg(&component.name)
            .arg("--namespace")
            .arg(&component.namespace)
            .arg("--wait");
        if let Some(kubeconfig) = &self.kubeconfig {
            cmd.arg("--kubeconfig").arg(kubeconfig);
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| ComponentError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_missing_release(&stderr) {
                return Ok(());
            }
            return Err(ComponentError::Failed {
                component: component.name.clone(),
                message: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "helm_tests.rs"]
mod tests;
