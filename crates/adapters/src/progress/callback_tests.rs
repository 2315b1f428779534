// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pi_core::{Phase, ProcessEvent};
use std::sync::Mutex;

#[test]
fn callback_sink_forwards_updates() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let sink = CallbackProgressSink::new(move |update: ProcessUpdate| {
        seen_clone.lock().unwrap().push(update.event);
    });

    sink.process_update(ProcessUpdate::lifecycle(
        Phase::Components,
        ProcessEvent::Start,
        None,
    ));
    sink.clone().process_update(ProcessUpdate::lifecycle(
        Phase::Components,
        ProcessEvent::Finished,
        None,
    ));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![ProcessEvent::Start, ProcessEvent::Finished]
    );
}
