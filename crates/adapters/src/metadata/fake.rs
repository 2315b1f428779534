// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake metadata provider for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MetadataError, MetadataProvider};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeMetadataState {
    namespaces: Vec<String>,
    error: Option<String>,
    calls: usize,
}

/// Fake metadata provider returning a fixed namespace list
#[derive(Clone, Default)]
pub struct FakeMetadataProvider {
    state: Arc<Mutex<FakeMetadataState>>,
}

impl FakeMetadataProvider {
    pub fn new(namespaces: &[&str]) -> Self {
        let provider = Self::default();
        provider.lock().namespaces = namespaces.iter().map(|ns| ns.to_string()).collect();
        provider
    }

    /// Make lookups fail
    pub fn set_error(&self, message: &str) {
        self.lock().error = Some(message.to_string());
    }

    /// Number of lookups made
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeMetadataState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadataProvider {
    async fn namespaces(&self) -> Result<Vec<String>, MetadataError> {
        let mut state = self.lock();
        state.calls += 1;
        match &state.error {
            Some(message) => Err(MetadataError::Lookup(message.clone())),
            None => Ok(state.namespaces.clone()),
        }
    }
}
