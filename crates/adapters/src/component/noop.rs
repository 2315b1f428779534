// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op component uninstaller

use super::{ComponentError, ComponentUninstaller};
use async_trait::async_trait;
use pi_core::ComponentSpec;

/// Uninstaller that succeeds without doing anything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpComponentUninstaller;

impl NoOpComponentUninstaller {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ComponentUninstaller for NoOpComponentUninstaller {
    async fn uninstall(&self, _component: &ComponentSpec) -> Result<(), ComponentError> {
        Ok(())
    }
}
