// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Uninstallation phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two ordered uninstallation stages.
///
/// Components are torn down first, prerequisites (the workloads components
/// depend on) second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Prerequisites,
    Components,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Prerequisites => "uninstall-prerequisites",
            Phase::Components => "uninstall-components",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
