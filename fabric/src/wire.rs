/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Wire framing helpers for the supervisory protocol. The point-to-point
//! multipart transport itself (ROUTER/DEALER sockets, identity prefixes)
//! is an external collaborator; this module only encodes/decodes the
//! frame contents the core cares about.

use common::constants::{TAG_HEARTBEAT, TAG_READY};
use lifecycle::{Signal, State};

/// What a message received on a socket turns out to mean, after
/// classification by multipart frame count.
#[derive(Debug, PartialEq, Eq)]
pub enum Classified {
    /// 2 frames: {symbolic-id, tag}. `ready` is true when tag == READY.
    StatusOrReady { symbolic_id: u8, ready: bool },
    /// 3 frames: {symbolic-id, state tag, signal tag}.
    Heartbeat { symbolic_id: u8, state: Option<State>, signal: Option<Signal> },
    /// Anything else: pass-through reply/request content.
    Content(Vec<Vec<u8>>),
}

/// Classifies a downstream message (after the router unwraps the identity
/// frame) by its 2-frame / 3-frame / otherwise shape.
pub fn classify_downstream(frames: Vec<Vec<u8>>) -> Classified {
    match frames.len() {
        2 => Classified::StatusOrReady {
            symbolic_id: frames[0].first().copied().unwrap_or(0),
            ready: frames[1].first().copied() == Some(TAG_READY),
        },
        3 => Classified::Heartbeat {
            symbolic_id: frames[0].first().copied().unwrap_or(0),
            state: state_from_tag(frames[1].first().copied().unwrap_or(0)),
            signal: Signal::from_tag(frames[2].first().copied().unwrap_or(0)),
        },
        _ => Classified::Content(frames),
    }
}

fn state_from_tag(tag: u8) -> Option<State> {
    State::ALL.into_iter().find(|s| s.tag() == tag)
}

/// Builds the single-frame ready announcement {0x01}.
pub fn ready_frame() -> Vec<u8> {
    vec![TAG_READY]
}

/// Builds the two-frame upstream announce {symbolic-ID, READY}.
pub fn announce_frames(symbolic_id: u8) -> Vec<Vec<u8>> {
    vec![vec![symbolic_id], vec![TAG_READY]]
}

/// Builds the single-frame heartbeat tag {0x02}.
pub fn heartbeat_tag_frame() -> Vec<u8> {
    vec![TAG_HEARTBEAT]
}

/// Builds the three-frame upstream status heartbeat {symbolic-ID, state, last-signal}.
pub fn status_heartbeat_frames(symbolic_id: u8, state: State, signal: Signal) -> Vec<Vec<u8>> {
    vec![vec![symbolic_id], vec![state.tag()], vec![signal.tag()]]
}

/// Classifies an upstream message: a 1-frame message is a heartbeat/ready
/// tag; anything else is request content to forward downstream.
pub fn classify_upstream(frames: Vec<Vec<u8>>) -> Classified {
    if frames.len() == 1 {
        let tag = frames[0].first().copied().unwrap_or(0);
        Classified::StatusOrReady { symbolic_id: 0, ready: tag == TAG_READY }
    } else {
        Classified::Content(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::constants::ID_QAS;

    #[test]
    fn classifies_two_frame_ready() {
        let classified = classify_downstream(vec![vec![ID_QAS], vec![TAG_READY]]);
        assert_eq!(classified, Classified::StatusOrReady { symbolic_id: ID_QAS, ready: true });
    }

    #[test]
    fn classifies_three_frame_heartbeat() {
        let classified =
            classify_downstream(vec![vec![ID_QAS], vec![State::Running.tag()], vec![Signal::Run.tag()]]);
        assert_eq!(
            classified,
            Classified::Heartbeat { symbolic_id: ID_QAS, state: Some(State::Running), signal: Some(Signal::Run) }
        );
    }

    #[test]
    fn classifies_other_sizes_as_content() {
        let classified = classify_downstream(vec![vec![1], vec![2], vec![3], vec![4]]);
        assert!(matches!(classified, Classified::Content(_)));
    }

    #[test]
    fn classifies_upstream_single_frame_as_heartbeat() {
        let classified = classify_upstream(vec![heartbeat_tag_frame()]);
        assert_eq!(classified, Classified::StatusOrReady { symbolic_id: 0, ready: false });
    }
}
