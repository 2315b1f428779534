// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::component::ComponentStatus;
use proptest::prelude::*;
use yare::parameterized;

fn ok(name: &str) -> RunInput {
    RunInput::Status(Component::success(name, "kyma-system"))
}

fn err(name: &str) -> RunInput {
    RunInput::Status(Component::failed(name, "kyma-system", "uninstall failed"))
}

fn run_inputs(inputs: Vec<RunInput>) -> (PhaseRun, Vec<RunEffect>) {
    let mut run = PhaseRun::new(Phase::Components);
    let mut effects = Vec::new();
    for input in inputs {
        effects.extend(run.handle(input));
    }
    (run, effects)
}

#[test]
fn clean_close_finishes() {
    let (run, effects) = run_inputs(vec![ok("a"), ok("b"), RunInput::StreamClosed]);

    assert_eq!(run.outcome(), Some(RunOutcome::Finished));
    assert_eq!(
        effects.last(),
        Some(&RunEffect::Complete(RunOutcome::Finished))
    );
    assert_eq!(run.statuses().len(), 2);
}

#[test]
fn errors_do_not_stop_the_loop() {
    let mut run = PhaseRun::new(Phase::Components);

    let effects = run.handle(err("a"));

    assert_eq!(run.state(), RunState::Running);
    assert!(matches!(effects.as_slice(), [RunEffect::Forward(c)] if c.name == "a"));
    assert_eq!(run.failed(), 1);
}

#[test]
fn cancel_timeout_requests_cancellation_once() {
    let mut run = PhaseRun::new(Phase::Prerequisites);

    assert_eq!(run.handle(RunInput::CancelTimeout), vec![RunEffect::Cancel]);
    assert_eq!(run.state(), RunState::SoftCancelled);
    assert!(!run.awaits_cancel_timeout());
    assert!(run.handle(RunInput::CancelTimeout).is_empty());
}

#[test]
fn statuses_after_soft_cancel_are_still_forwarded() {
    let (run, effects) = run_inputs(vec![RunInput::CancelTimeout, ok("late")]);

    assert_eq!(run.state(), RunState::SoftCancelled);
    assert_eq!(run.statuses().get("late"), Some(ComponentStatus::Success));
    assert!(matches!(effects.last(), Some(RunEffect::Forward(_))));
}

#[test]
fn quit_while_running_cancels_and_fails() {
    let (run, effects) = run_inputs(vec![RunInput::QuitTimeout]);

    assert_eq!(
        effects,
        vec![
            RunEffect::Cancel,
            RunEffect::Complete(RunOutcome::ForceQuitFailure)
        ]
    );
    assert_eq!(run.outcome(), Some(RunOutcome::ForceQuitFailure));
}

#[test]
fn inputs_after_terminal_are_ignored() {
    let (mut run, _) = run_inputs(vec![RunInput::CancelTimeout, RunInput::QuitTimeout]);

    assert!(run.handle(ok("straggler")).is_empty());
    assert!(run.handle(RunInput::StreamClosed).is_empty());
    assert_eq!(run.outcome(), Some(RunOutcome::ForceQuitFailure));
    assert!(run.statuses().get("straggler").is_none());
}

#[parameterized(
    clean = { vec![ok("a"), RunInput::StreamClosed], RunOutcome::Finished },
    one_error = { vec![ok("a"), err("b"), ok("c"), RunInput::StreamClosed], RunOutcome::ComponentFailure { failed: 1 } },
    errors_beat_timeout = { vec![err("a"), RunInput::CancelTimeout, err("b"), RunInput::StreamClosed], RunOutcome::ComponentFailure { failed: 2 } },
    timeout_beats_clean_stop = { vec![ok("a"), RunInput::CancelTimeout, ok("b"), RunInput::StreamClosed], RunOutcome::TimeoutFailure },
    quit_after_cancel = { vec![RunInput::CancelTimeout, RunInput::QuitTimeout], RunOutcome::ForceQuitFailure },
    quit_beats_errors = { vec![err("a"), RunInput::QuitTimeout], RunOutcome::ForceQuitFailure },
)]
fn outcome_table(inputs: Vec<RunInput>, expected: RunOutcome) {
    let (run, _) = run_inputs(inputs);
    assert_eq!(run.outcome(), Some(expected));
}

#[test]
fn outcome_maps_to_lifecycle_event() {
    assert_eq!(RunOutcome::Finished.event(), ProcessEvent::Finished);
    assert_eq!(
        RunOutcome::ComponentFailure { failed: 3 }.event(),
        ProcessEvent::ComponentFailure
    );
    assert_eq!(RunOutcome::TimeoutFailure.event(), ProcessEvent::TimeoutFailure);
    assert_eq!(
        RunOutcome::ForceQuitFailure.event(),
        ProcessEvent::ForceQuitFailure
    );
    assert!(RunOutcome::Finished.event().is_terminal());
}

fn arb_input() -> impl Strategy<Value = RunInput> {
    prop_oneof![
        4 => any::<bool>().prop_map(|failed| if failed { err("x") } else { ok("x") }),
        1 => Just(RunInput::StreamClosed),
        1 => Just(RunInput::CancelTimeout),
        1 => Just(RunInput::QuitTimeout),
    ]
}

proptest! {
    #[test]
    fn exactly_one_completion(inputs in proptest::collection::vec(arb_input(), 0..40)) {
        let (run, effects) = run_inputs(inputs);
        let completions = effects
            .iter()
            .filter(|e| matches!(e, RunEffect::Complete(_)))
            .count();

        prop_assert!(completions <= 1);
        prop_assert_eq!(completions == 1, run.is_terminal());
        if run.is_terminal() {
            prop_assert!(matches!(effects.last(), Some(RunEffect::Complete(_))));
        }
    }

    #[test]
    fn failure_count_matches_error_statuses(
        statuses in proptest::collection::vec(any::<bool>(), 0..30)
    ) {
        let expected = statuses.iter().filter(|failed| **failed).count();
        let mut inputs: Vec<RunInput> = statuses
            .iter()
            .enumerate()
            .map(|(i, failed)| {
                let name = format!("component-{}", i);
                if *failed { err(&name) } else { ok(&name) }
            })
            .collect();
        inputs.push(RunInput::StreamClosed);

        let (run, _) = run_inputs(inputs);

        if expected > 0 {
            prop_assert_eq!(run.outcome(), Some(RunOutcome::ComponentFailure { failed: expected }));
        } else {
            prop_assert_eq!(run.outcome(), Some(RunOutcome::Finished));
        }
    }

    #[test]
    fn soft_cancelled_run_never_finishes_cleanly(
        before in proptest::collection::vec(any::<bool>(), 0..10),
        after in proptest::collection::vec(any::<bool>(), 0..10),
    ) {
        let to_input = |failed: &bool| if *failed { err("c") } else { ok("c") };
        let mut inputs: Vec<RunInput> = before.iter().map(to_input).collect();
        inputs.push(RunInput::CancelTimeout);
        inputs.extend(after.iter().map(to_input));
        inputs.push(RunInput::StreamClosed);

        let (run, _) = run_inputs(inputs);

        prop_assert_ne!(run.outcome(), Some(RunOutcome::Finished));
    }
}
