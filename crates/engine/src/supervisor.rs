// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timeout supervision of a single phase run
//!
//! The supervisor races the engine's status stream against the soft-cancel
//! and hard-quit timers and feeds whatever happens first into a [`PhaseRun`].

use crate::error::PhaseError;
use pi_adapters::{PhaseEngine, ProgressSink};
use pi_core::{
    CancelSignal, Phase, PhaseRun, ProcessEvent, ProcessUpdate, RunEffect, RunInput, RunOutcome,
    TimeoutBudget,
};
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

// Roughly thirty years
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Supervises phase runs and reports their progress
#[derive(Clone)]
pub struct Supervisor<P> {
    progress: P,
}

impl<P: ProgressSink> Supervisor<P> {
    pub fn new(progress: P) -> Self {
        Self { progress }
    }

    /// Run `engine` for `phase` within `budget`.
    ///
    /// Emits one `Start` update followed by exactly one terminal update.
    /// `cancel` is fired when the soft-cancel timer expires.
    pub async fn run<E: PhaseEngine>(
        &self,
        phase: Phase,
        engine: &E,
        cancel: &CancelSignal,
        budget: TimeoutBudget,
    ) -> Result<(), PhaseError> {
        let started = Instant::now();
        let cancel_timer = sleep_until(deadline(started, budget.cancel));
        let quit_timer = sleep_until(deadline(started, budget.quit));
        tokio::pin!(cancel_timer);
        tokio::pin!(quit_timer);

        self.progress
            .process_update(ProcessUpdate::lifecycle(phase, ProcessEvent::Start, None));
        tracing::info!(
            %phase,
            cancel_ms = budget.cancel.as_millis() as u64,
            quit_ms = budget.quit.as_millis() as u64,
            "phase started"
        );

        let mut run = PhaseRun::new(phase);
        let start = engine.uninstall(cancel.clone());
        tokio::pin!(start);

        let outcome = 'run: {
            // Timers already run while the engine is starting
            let mut statuses = loop {
                tokio::select! {
                    biased;
                    result = &mut start => match result {
                        Ok(rx) => break rx,
                        Err(source) => {
                            let err = PhaseError::Engine { phase, source };
                            tracing::error!(%phase, error = %err, "phase engine failed to start");
                            self.progress.process_update(ProcessUpdate::lifecycle(
                                phase,
                                ProcessEvent::ComponentFailure,
                                Some(err.to_string()),
                            ));
                            return Err(err);
                        }
                    },
                    _ = &mut quit_timer => {
                        if let Some(outcome) = self.apply(&mut run, RunInput::QuitTimeout, cancel) {
                            break 'run outcome;
                        }
                    }
                    _ = &mut cancel_timer, if run.awaits_cancel_timeout() => {
                        if let Some(outcome) = self.apply(&mut run, RunInput::CancelTimeout, cancel) {
                            break 'run outcome;
                        }
                    }
                }
            };

            loop {
                let input = tokio::select! {
                    biased;
                    status = statuses.recv() => match status {
                        Some(component) => RunInput::Status(component),
                        None => RunInput::StreamClosed,
                    },
                    _ = &mut quit_timer => RunInput::QuitTimeout,
                    _ = &mut cancel_timer, if run.awaits_cancel_timeout() => RunInput::CancelTimeout,
                };
                if let Some(outcome) = self.apply(&mut run, input, cancel) {
                    break outcome;
                }
            }
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let result = match outcome {
            RunOutcome::Finished => Ok(()),
            RunOutcome::ComponentFailure { failed } => {
                Err(PhaseError::ComponentFailure { phase, failed })
            }
            RunOutcome::TimeoutFailure => Err(PhaseError::Timeout { phase }),
            RunOutcome::ForceQuitFailure => {
                tracing::warn!(%phase, "stopped waiting for phase engine, it may still be running");
                Err(PhaseError::ForceQuit { phase })
            }
        };

        match &result {
            Ok(()) => tracing::info!(%phase, elapsed_ms, "phase finished"),
            Err(e) => {
                tracing::error!(%phase, elapsed_ms, error = %e, "phase failed");
                for (component, status) in run.statuses().sorted() {
                    tracing::info!(%phase, component, %status, "last component status");
                }
            }
        }

        self.progress.process_update(ProcessUpdate::lifecycle(
            phase,
            outcome.event(),
            result.as_ref().err().map(|e| e.to_string()),
        ));
        result
    }

    /// Feed one input to `run` and carry out its effects.
    ///
    /// Returns the outcome once the run is terminal.
    fn apply(
        &self,
        run: &mut PhaseRun,
        input: RunInput,
        cancel: &CancelSignal,
    ) -> Option<RunOutcome> {
        let phase = run.phase();
        let mut completed = None;
        for effect in run.handle(input) {
            match effect {
                RunEffect::Forward(component) => {
                    tracing::debug!(
                        %phase,
                        component = %component.name,
                        status = %component.status,
                        "component status"
                    );
                    self.progress
                        .process_update(ProcessUpdate::component(phase, component));
                }
                RunEffect::Cancel => {
                    tracing::warn!(%phase, "timeout reached, cancelling phase engine");
                    cancel.cancel();
                }
                RunEffect::Complete(outcome) => completed = Some(outcome),
            }
        }
        completed
    }
}

/// `start + after`, or a deadline that never arrives when that overflows
fn deadline(start: Instant, after: Duration) -> Instant {
    start
        .checked_add(after)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
