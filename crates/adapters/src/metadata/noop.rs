// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op metadata provider

use super::{MetadataError, MetadataProvider};
use async_trait::async_trait;

/// Metadata provider that knows no namespaces
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpMetadataProvider;

impl NoOpMetadataProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetadataProvider for NoOpMetadataProvider {
    async fn namespaces(&self) -> Result<Vec<String>, MetadataError> {
        Ok(vec![])
    }
}
