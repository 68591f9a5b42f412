/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

use common::constants;

/// One of the seven lifecycle states. `no-state` is not a variant here —
/// it is represented as `Option<State>::None` at the table and planner
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Creating,
    Initializing,
    Configuring,
    Running,
    Pausing,
    Finalizing,
    Deleting,
}

impl State {
    pub const ALL: [State; 7] = [
        State::Creating,
        State::Initializing,
        State::Configuring,
        State::Running,
        State::Pausing,
        State::Finalizing,
        State::Deleting,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            State::Creating => 0,
            State::Initializing => 1,
            State::Configuring => 2,
            State::Running => 3,
            State::Pausing => 4,
            State::Finalizing => 5,
            State::Deleting => 6,
        }
    }

    /// The 1-byte wire tag used on heartbeat frames.
    pub fn tag(self) -> u8 {
        match self {
            State::Creating => constants::STATE_TAG_CREATING,
            State::Initializing => constants::STATE_TAG_INITIALIZING,
            State::Configuring => constants::STATE_TAG_CONFIGURING,
            State::Running => constants::STATE_TAG_RUNNING,
            State::Pausing => constants::STATE_TAG_PAUSING,
            State::Finalizing => constants::STATE_TAG_FINALIZING,
            State::Deleting => constants::STATE_TAG_DELETING,
        }
    }
}

/// One of the five operator signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Run,
    Pause,
    Stop,
    Configure,
    Reboot,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::Run,
        Signal::Pause,
        Signal::Stop,
        Signal::Configure,
        Signal::Reboot,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Signal::Run => 0,
            Signal::Pause => 1,
            Signal::Stop => 2,
            Signal::Configure => 3,
            Signal::Reboot => 4,
        }
    }

    /// The 1-byte wire tag used on heartbeat frames.
    pub fn tag(self) -> u8 {
        match self {
            Signal::Run => constants::SIGNAL_TAG_RUN,
            Signal::Pause => constants::SIGNAL_TAG_PAUSE,
            Signal::Stop => constants::SIGNAL_TAG_STOP,
            Signal::Configure => constants::SIGNAL_TAG_CONFIGURE,
            Signal::Reboot => constants::SIGNAL_TAG_REBOOT,
        }
    }

    /// Parses an incoming wire tag, for peers reporting their last signal in
    /// a 3-frame heartbeat. Unrecognized tags have no sensible default
    /// signal, so this returns `None` rather than guessing.
    pub fn from_tag(tag: u8) -> Option<Signal> {
        Signal::ALL.into_iter().find(|s| s.tag() == tag)
    }
}
