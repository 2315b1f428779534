// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted phase engine for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{EngineError, PhaseEngine};
use async_trait::async_trait;
use pi_core::{CancelSignal, Component};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// What the scripted engine does after its last scripted event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AfterScript {
    /// Close the stream
    #[default]
    Close,
    /// Keep the stream open until cancellation, then close after `close_delay`
    UntilCancelled,
    /// Never close the stream
    Hang,
}

#[derive(Clone)]
struct Step {
    delay: Duration,
    component: Component,
}

#[derive(Default)]
struct FakeEngineState {
    steps: Vec<Step>,
    after: AfterScript,
    ignore_cancel: bool,
    close_delay: Duration,
    start_error: Option<String>,
    runs: usize,
    cancelled_runs: usize,
}

/// Phase engine that replays a script of timed status events.
///
/// By default the engine stops emitting and closes its stream once the
/// cancellation signal fires.
#[derive(Clone, Default)]
pub struct FakePhaseEngine {
    state: Arc<Mutex<FakeEngineState>>,
}

impl FakePhaseEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `component` after `delay` (measured from the previous event)
    pub fn emit_after(self, delay: Duration, component: Component) -> Self {
        self.lock().steps.push(Step { delay, component });
        self
    }

    /// Emit `component` right after the previous event
    pub fn emit(self, component: Component) -> Self {
        self.emit_after(Duration::ZERO, component)
    }

    pub fn then(self, after: AfterScript) -> Self {
        self.lock().after = after;
        self
    }

    /// Keep replaying the script even after cancellation fired
    pub fn ignoring_cancel(self) -> Self {
        self.lock().ignore_cancel = true;
        self
    }

    /// Time the engine takes to wind down after observing cancellation
    pub fn close_delay(self, delay: Duration) -> Self {
        self.lock().close_delay = delay;
        self
    }

    /// Make `uninstall` fail before returning a stream
    pub fn fail_start(self, message: &str) -> Self {
        self.lock().start_error = Some(message.to_string());
        self
    }

    /// Number of `uninstall` calls
    pub fn runs(&self) -> usize {
        self.lock().runs
    }

    /// Number of runs that observed cancellation
    pub fn cancelled_runs(&self) -> usize {
        self.lock().cancelled_runs
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeEngineState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn mark_cancelled(&self) {
        self.lock().cancelled_runs += 1;
    }

    async fn replay(self, steps: Vec<Step>, cancel: CancelSignal, tx: mpsc::Sender<Component>) {
        let (after, ignore_cancel, close_delay) = {
            let state = self.lock();
            (state.after, state.ignore_cancel, state.close_delay)
        };

        for step in steps {
            if ignore_cancel {
                tokio::time::sleep(step.delay).await;
            } else {
                tokio::select! {
                    _ = tokio::time::sleep(step.delay) => {}
                    _ = cancel.cancelled() => {
                        self.mark_cancelled();
                        tokio::time::sleep(close_delay).await;
                        return;
                    }
                }
            }
            if tx.send(step.component).await.is_err() {
                return;
            }
        }

        match after {
            AfterScript::Close => {}
            AfterScript::UntilCancelled => {
                cancel.cancelled().await;
                self.mark_cancelled();
                tokio::time::sleep(close_delay).await;
            }
            AfterScript::Hang => std::future::pending::<()>().await,
        }
        drop(tx);
    }
}

#[async_trait]
impl PhaseEngine for FakePhaseEngine {
    async fn uninstall(
        &self,
        cancel: CancelSignal,
    ) -> Result<mpsc::Receiver<Component>, EngineError> {
        let steps = {
            let mut state = self.lock();
            state.runs += 1;
            if let Some(message) = &state.start_error {
                return Err(EngineError::StartFailed(message.clone()));
            }
            state.steps.clone()
        };

        let (tx, rx) = mpsc::channel(steps.len().max(1));
        tokio::spawn(self.clone().replay(steps, cancel, tx));
        Ok(rx)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
