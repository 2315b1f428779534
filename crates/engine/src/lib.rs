// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Platform uninstallation engine
//!
//! Runs the two supervised uninstallation phases and tears down the
//! namespaces the platform left behind.

mod deletion;
mod error;
mod pool;
mod retry;
mod supervisor;
mod teardown;

pub use deletion::{Deletion, DeletionDeps};
pub use error::{DeletionError, PhaseError, TeardownError, TeardownFailure, TeardownStep};
pub use pool::WorkerPool;
pub use retry::retry;
pub use supervisor::Supervisor;
pub use teardown::NamespaceTeardown;
