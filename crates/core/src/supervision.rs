// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State machine for one supervised phase run
//!
//! A phase run races the engine's status stream against a soft-cancel and a
//! hard-quit timer. The machine only decides; the async supervisor in
//! `pi-engine` feeds it inputs and carries out the returned effects.
//!
//! ```text
//! Running --CancelTimeout--> SoftCancelled
//! Running | SoftCancelled --StreamClosed--> Terminal(Finished | ComponentFailure | TimeoutFailure)
//! Running | SoftCancelled --QuitTimeout--> Terminal(ForceQuitFailure)
//! ```
//!
//! A run that saw the soft timer fire never ends as `Finished`.

use crate::component::{Component, StatusMap};
use crate::phase::Phase;
use crate::progress::ProcessEvent;

/// Terminal result of a phase run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Finished,
    ComponentFailure { failed: usize },
    TimeoutFailure,
    ForceQuitFailure,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Finished)
    }

    /// Lifecycle event announcing this outcome
    pub fn event(&self) -> ProcessEvent {
        match self {
            RunOutcome::Finished => ProcessEvent::Finished,
            RunOutcome::ComponentFailure { .. } => ProcessEvent::ComponentFailure,
            RunOutcome::TimeoutFailure => ProcessEvent::TimeoutFailure,
            RunOutcome::ForceQuitFailure => ProcessEvent::ForceQuitFailure,
        }
    }
}

/// State of a phase run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    SoftCancelled,
    Terminal(RunOutcome),
}

/// Inputs from the multiplexed wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunInput {
    Status(Component),
    StreamClosed,
    CancelTimeout,
    QuitTimeout,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEffect {
    /// Forward a component status to the progress sink
    Forward(Component),
    /// Fire the shared cancellation signal
    Cancel,
    /// The run reached its outcome
    Complete(RunOutcome),
}

/// One phase run: state plus the diagnostics it accumulates
#[derive(Debug, Clone)]
pub struct PhaseRun {
    phase: Phase,
    state: RunState,
    statuses: StatusMap,
    failed: usize,
}

impl PhaseRun {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            state: RunState::Running,
            statuses: StatusMap::new(),
            failed: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        match self.state {
            RunState::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, RunState::Terminal(_))
    }

    /// Whether the soft-cancel timer still matters
    pub fn awaits_cancel_timeout(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn statuses(&self) -> &StatusMap {
        &self.statuses
    }

    /// Number of `Error` statuses seen so far
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Apply an input and return the effects to carry out, in order.
    ///
    /// Inputs after the run is terminal are ignored.
    pub fn handle(&mut self, input: RunInput) -> Vec<RunEffect> {
        match (self.state, input) {
            (RunState::Terminal(_), _) => vec![],

            (_, RunInput::Status(component)) => {
                if component.is_error() {
                    self.failed += 1;
                }
                self.statuses.record(&component);
                vec![RunEffect::Forward(component)]
            }

            (state, RunInput::StreamClosed) => {
                let outcome = if self.failed > 0 {
                    RunOutcome::ComponentFailure {
                        failed: self.failed,
                    }
                } else if state == RunState::SoftCancelled {
                    RunOutcome::TimeoutFailure
                } else {
                    RunOutcome::Finished
                };
                self.complete(outcome)
            }

            (RunState::Running, RunInput::CancelTimeout) => {
                self.state = RunState::SoftCancelled;
                vec![RunEffect::Cancel]
            }
            (RunState::SoftCancelled, RunInput::CancelTimeout) => vec![],

            (RunState::Running, RunInput::QuitTimeout) => {
                // Quit overtook the soft timer; still ask the engine to stop
                let mut effects = vec![RunEffect::Cancel];
                effects.extend(self.complete(RunOutcome::ForceQuitFailure));
                effects
            }
            (RunState::SoftCancelled, RunInput::QuitTimeout) => {
                self.complete(RunOutcome::ForceQuitFailure)
            }
        }
    }

    fn complete(&mut self, outcome: RunOutcome) -> Vec<RunEffect> {
        self.state = RunState::Terminal(outcome);
        vec![RunEffect::Complete(outcome)]
    }
}

#[cfg(test)]
#[path = "supervision_tests.rs"]
mod tests;
