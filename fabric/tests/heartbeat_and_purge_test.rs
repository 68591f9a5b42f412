/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Exercises periodic downstream heartbeating and peer expiry/purge
//! against a real resource actor with no upstream to talk to.

use std::time::{Duration, Instant};

use fabric::{RoleConfig, UpstreamKind};

const BACKEND_BIND: &str = "tcp://*:19710";
const BACKEND_CONNECT: &str = "tcp://localhost:19710";

fn line_role() -> RoleConfig {
    RoleConfig {
        node_name: "test line".to_string(),
        upstream_kind: UpstreamKind::Dealer,
        // Nothing listens here; DEALER connect is lazy so this never blocks
        // startup. This test only cares about the downstream side.
        upstream_endpoint: "tcp://localhost:19711".to_string(),
        downstream_bind: Some(BACKEND_BIND.to_string()),
        symbolic_id: Some(common::constants::ID_LINE),
        required_peers: Vec::new(),
    }
}

#[tokio::test]
async fn emits_periodic_downstream_heartbeat_and_purges_after_expiry() {
    let actor = fabric::spawn(line_role()).await;

    let ctx = zmq::Context::new();
    let fake_peer = ctx.socket(zmq::DEALER).unwrap();
    fake_peer.connect(BACKEND_CONNECT).unwrap();
    fake_peer
        .send_multipart(vec![vec![common::constants::ID_QAS], vec![common::constants::TAG_READY]], 0)
        .unwrap();

    // A downstream heartbeat should arrive within roughly one heartbeat
    // interval of admission.
    let mut items = [fake_peer.as_poll_item(zmq::POLLIN)];
    zmq::poll(&mut items, 1500).unwrap();
    assert!(items[0].is_readable(), "expected a downstream heartbeat within one heartbeat interval");
    let frames = fake_peer.recv_multipart(0).unwrap();
    assert_eq!(frames, vec![vec![common::constants::TAG_HEARTBEAT]]);

    // Drain any further heartbeats sent while the peer is still alive,
    // without ever refreshing it ourselves.
    let deadline = Instant::now() + Duration::from_millis(3200);
    while Instant::now() < deadline {
        let mut items = [fake_peer.as_poll_item(zmq::POLLIN)];
        zmq::poll(&mut items, 200).unwrap();
        if items[0].is_readable() {
            let _ = fake_peer.recv_multipart(0);
        }
    }

    // The peer's expiry (L * heartbeat_interval = 3000ms) has now passed
    // with no refresh, so purge should have dropped it: no further
    // heartbeats should arrive.
    let mut items = [fake_peer.as_poll_item(zmq::POLLIN)];
    zmq::poll(&mut items, 1500).unwrap();
    assert!(!items[0].is_readable(), "peer should have been purged after expiry and stopped receiving heartbeats");

    actor.stop().await;
}
