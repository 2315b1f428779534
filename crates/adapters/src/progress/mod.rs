// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress sinks
//!
//! Sinks are fire-and-forget: they cannot fail the run and must return
//! promptly.

mod callback;
mod noop;

pub use callback::CallbackProgressSink;
pub use noop::NoOpProgressSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProgressSink;

use pi_core::ProcessUpdate;

/// Receiver of lifecycle and component status updates
pub trait ProgressSink: Clone + Send + Sync + 'static {
    fn process_update(&self, update: ProcessUpdate);
}
