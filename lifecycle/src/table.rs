/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Component A: the static transition table, realised as a dense array
//! indexed by variant rather than a dynamically registered dispatch table.

use crate::state::{Signal, State};

type Row = [Option<State>; 5];

/// `TABLE[state.index()][signal.index()]` — `None` is the "no-state" sentinel.
const TABLE: [Row; 7] = {
    use State::*;
    [
        // creating
        [
            Some(Initializing),
            Some(Initializing),
            Some(Initializing),
            Some(Initializing),
            Some(Initializing),
        ],
        // initializing
        [
            Some(Configuring),
            Some(Configuring),
            Some(Configuring),
            Some(Configuring),
            None,
        ],
        // configuring
        [Some(Running), Some(Pausing), Some(Pausing), None, Some(Pausing)],
        // running
        [
            None,
            Some(Pausing),
            Some(Pausing),
            Some(Configuring),
            Some(Pausing),
        ],
        // pausing
        [
            Some(Running),
            None,
            Some(Finalizing),
            Some(Configuring),
            Some(Finalizing),
        ],
        // finalizing
        [
            Some(Initializing),
            Some(Initializing),
            Some(Deleting),
            Some(Initializing),
            Some(Initializing),
        ],
        // deleting
        [None, None, None, None, None],
    ]
};

/// The total function (state × signal) → (state ∪ no-state).
pub fn next(current: State, signal: Signal) -> Option<State> {
    TABLE[current.index()][signal.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleting_is_a_sink_for_every_signal() {
        for signal in Signal::ALL {
            assert_eq!(next(State::Deleting, signal), None);
        }
    }

    #[test]
    fn creating_always_advances_to_initializing() {
        for signal in Signal::ALL {
            assert_eq!(next(State::Creating, signal), Some(State::Initializing));
        }
    }

    #[test]
    fn spot_checks_from_spec_table() {
        assert_eq!(next(State::Running, Signal::Configure), Some(State::Configuring));
        assert_eq!(next(State::Running, Signal::Run), None);
        assert_eq!(next(State::Pausing, Signal::Pause), None);
        assert_eq!(next(State::Finalizing, Signal::Stop), Some(State::Deleting));
        assert_eq!(next(State::Configuring, Signal::Configure), None);
    }

    /// No signal drives any state around a cycle — repeated application of
    /// `next` under a fixed signal always reaches `None` within the
    /// run-list depth bound.
    #[test]
    fn every_signal_terminates_within_bound() {
        for state in State::ALL {
            for signal in Signal::ALL {
                let mut current = Some(state);
                let mut steps = 0;
                while let Some(s) = current {
                    current = next(s, signal);
                    steps += 1;
                    assert!(steps <= common::constants::RUN_LIST_DEPTH + 2, "cycle detected for {state:?}/{signal:?}");
                }
            }
        }
    }
}
