// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress updates emitted to the caller during an uninstallation run

use crate::component::Component;
use crate::phase::Phase;
use serde::{Deserialize, Serialize};

/// Lifecycle event of a supervised phase run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessEvent {
    /// Phase run started
    Start,
    /// A component reported a status while the phase was running
    Running,
    /// Phase finished without errors
    Finished,
    /// One or more components failed
    ComponentFailure,
    /// Soft cancel fired; the engine stopped afterwards
    TimeoutFailure,
    /// Hard quit fired before the engine stopped
    ForceQuitFailure,
}

impl ProcessEvent {
    /// True for the events that close a phase run
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProcessEvent::Start | ProcessEvent::Running)
    }
}

/// A single notification for the progress sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessUpdate {
    pub event: ProcessEvent,
    pub phase: Phase,
    /// Set for `Running` updates
    pub component: Option<Component>,
    /// Set for failure events
    pub error: Option<String>,
}

impl ProcessUpdate {
    pub fn lifecycle(phase: Phase, event: ProcessEvent, error: Option<String>) -> Self {
        Self {
            event,
            phase,
            component: None,
            error,
        }
    }

    pub fn component(phase: Phase, component: Component) -> Self {
        Self {
            event: ProcessEvent::Running,
            phase,
            component: Some(component),
            error: None,
        }
    }
}
