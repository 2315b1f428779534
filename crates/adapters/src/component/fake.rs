// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake component uninstaller for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ComponentError, ComponentUninstaller};
use async_trait::async_trait;
use pi_core::ComponentSpec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct FakeUninstallerState {
    failures: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    started: Vec<String>,
    finished: Vec<String>,
    in_flight: usize,
    max_in_flight: usize,
}

/// Fake uninstaller with per-component failures and delays
#[derive(Clone, Default)]
pub struct FakeComponentUninstaller {
    state: Arc<Mutex<FakeUninstallerState>>,
}

impl FakeComponentUninstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make removal of `name` fail
    pub fn fail(&self, name: &str, message: &str) {
        self.lock()
            .failures
            .insert(name.to_string(), message.to_string());
    }

    /// Time removal of `name` takes
    pub fn delay(&self, name: &str, delay: Duration) {
        self.lock().delays.insert(name.to_string(), delay);
    }

    /// Time removal of components without their own delay takes
    pub fn default_delay(&self, delay: Duration) {
        self.lock().default_delay = delay;
    }

    /// Components whose removal started, in order
    pub fn started(&self) -> Vec<String> {
        self.lock().started.clone()
    }

    /// Components whose removal finished, in order
    pub fn finished(&self) -> Vec<String> {
        self.lock().finished.clone()
    }

    /// Highest number of removals running at once
    pub fn max_in_flight(&self) -> usize {
        self.lock().max_in_flight
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeUninstallerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ComponentUninstaller for FakeComponentUninstaller {
    async fn uninstall(&self, component: &ComponentSpec) -> Result<(), ComponentError> {
        let delay = {
            let mut state = self.lock();
            state.started.push(component.name.clone());
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state
                .delays
                .get(&component.name)
                .copied()
                .unwrap_or(state.default_delay)
        };

        tokio::time::sleep(delay).await;

        let mut state = self.lock();
        state.in_flight -= 1;
        state.finished.push(component.name.clone());
        match state.failures.get(&component.name) {
            Some(message) => Err(ComponentError::Failed {
                component: component.name.clone(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}
