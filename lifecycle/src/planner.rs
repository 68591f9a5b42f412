/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Component B: the path planner. A single operator signal is expanded
//! into an ordered run-list of intermediate states, making a chain of
//! transitions explicit data the dispatcher steps through rather than
//! implicit control flow.

use crate::payload::Payload;
use crate::state::{Signal, State};
use crate::table;
use crate::transition::{RunList, Transition};

/// Expands `(current, signal)` into the ordered sequence of intermediate
/// states a dispatcher will visit, first state first. Empty when the table
/// yields no-state immediately — a valid no-op result.
pub fn expand(current: State, signal: Signal) -> Vec<State> {
    let mut states = Vec::new();
    let mut cursor = table::next(current, signal);
    while let Some(state) = cursor {
        states.push(state);
        cursor = table::next(state, signal);
    }
    debug_assert!(
        states.len() <= common::constants::RUN_LIST_DEPTH,
        "planner expansion exceeded run-list depth for {current:?}/{signal:?}"
    );
    states
}

/// As `expand`, but already packaged as a run-list of transitions with
/// empty payloads, ready for the dispatcher. The run-list is a LIFO where
/// `pop` removes the last element, so `expand`'s first-state-first order
/// is reversed on the way in: the first state to run ends up last, i.e. on
/// top.
pub fn expand_run_list(current: State, signal: Signal) -> RunList {
    let mut run_list = RunList::new();
    for state in expand(current, signal).into_iter().rev() {
        // Cannot fail: `expand` never yields more than S states.
        let _ = run_list.push(Transition::new(state, Payload::empty()));
    }
    run_list
}

/// Builds the actor's starting run-list: the creator's bootstrap transition
/// (state = Creating, with the self-control-channel/symbolic-name payload)
/// on top of the expansion of `(initial_state, initial_signal)`, so the
/// bootstrap transition runs first.
pub fn bootstrap(bootstrap: Transition, initial_state: State, initial_signal: Signal) -> RunList {
    let mut run_list = expand_run_list(initial_state, initial_signal);
    if run_list.push(bootstrap).is_err() {
        tracing::error!("bootstrap run-list overflowed on construction");
    }
    run_list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_creating_run_reaches_running_through_init_and_configure() {
        assert_eq!(
            expand(State::Creating, Signal::Run),
            vec![State::Initializing, State::Configuring, State::Running]
        );
    }

    // The table-chase algorithm stops as soon as it hits a no-state entry:
    // table::next(Configuring, Configure) is None (configuring has no
    // "configure" transition, matching generate_stack in the original C
    // source), so reconfiguring while running only reaches Configuring —
    // it does not loop back through Running on its own. The dispatcher
    // re-entering Running after Configuring is a property of the running
    // handler's own behavior, not of this expansion.
    #[test]
    fn expand_running_configure_reaches_only_configuring() {
        assert_eq!(expand(State::Running, Signal::Configure), vec![State::Configuring]);
    }

    #[test]
    fn expand_deleting_run_is_empty() {
        assert_eq!(expand(State::Deleting, Signal::Run), Vec::<State>::new());
    }

    /// Every expansion terminates within the run-list depth bound, for
    /// every state and signal.
    #[test]
    fn every_expansion_respects_bound() {
        for state in State::ALL {
            for signal in Signal::ALL {
                assert!(expand(state, signal).len() <= common::constants::RUN_LIST_DEPTH);
            }
        }
    }

    /// The expanded sequence's last state to run targets a state whose row
    /// is a no-state sink for the same signal — i.e. expansion is maximal.
    #[test]
    fn expansion_is_maximal() {
        for state in State::ALL {
            for signal in Signal::ALL {
                let states = expand(state, signal);
                if let Some(last_to_run) = states.last() {
                    assert_eq!(
                        table::next(*last_to_run, signal),
                        None,
                        "expansion for {state:?}/{signal:?} stopped early"
                    );
                }
            }
        }
    }

    #[test]
    fn bootstrap_transition_runs_first() {
        use crate::payload::Value;
        use std::sync::Arc;

        let bootstrap_transition = Transition::new(
            State::Creating,
            Payload::zip(vec!["name"], vec![Arc::new("PnP Line".to_string()) as Value]).unwrap(),
        );
        let mut run_list = bootstrap(bootstrap_transition, State::Creating, Signal::Run);
        let first = run_list.pop().unwrap();
        assert_eq!(first.target, State::Creating);
        assert_eq!(run_list.pop().unwrap().target, State::Initializing);
        assert_eq!(run_list.pop().unwrap().target, State::Configuring);
        assert_eq!(run_list.pop().unwrap().target, State::Running);
        assert!(run_list.is_empty());
    }
}
