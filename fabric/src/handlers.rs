/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Component D's seven state function bodies, grounded on `plant.c`'s and
//! `line.c`'s `creating`/`initializing`/`configuring`/`running`/`pausing`/
//! `finalizing`/`deleting`. `running` here performs exactly one
//! poll-and-service iteration per call; `actor::run` re-enters it in a
//! loop.

use std::time::{Duration, Instant};

use lifecycle::Payload;

use crate::actor::{ControlPipe, Resource};
use crate::role::UpstreamKind;
use crate::wire::{self, Classified};

pub fn creating(resource: &mut Resource, payload: &Payload) -> i32 {
    tracing::info!(node = %resource.name, "creating...");

    if let Some(pipe) = payload.downcast::<ControlPipe>(0) {
        resource.control_rx = pipe.take();
    }
    if let Some(name) = payload.downcast::<String>(1) {
        resource.name = name.clone();
    }

    match open_upstream(&resource.ctx, &resource.role) {
        Ok(socket) => resource.upstream = Some(socket),
        Err(err) => {
            tracing::error!(node = %resource.name, error = %err, "failed to open upstream socket");
            return -1;
        }
    }
    if let Some(bind) = resource.role.downstream_bind.clone() {
        match open_router(&resource.ctx, &bind) {
            Ok(socket) => resource.downstream = Some(socket),
            Err(err) => {
                tracing::error!(node = %resource.name, error = %err, "failed to open downstream socket");
                return -1;
            }
        }
    }

    tracing::info!(node = %resource.name, "creating...done");
    0
}

pub fn initializing(resource: &mut Resource, _payload: &Payload) -> i32 {
    tracing::info!(node = %resource.name, "initializing...");

    // Acknowledge startup to whoever is waiting on `spawn`'s readiness gate,
    // the analogue of `line.c`'s `zsock_signal(self->pipe, 0)`.
    if let Some(ready_tx) = resource.ready_tx.take() {
        let _ = ready_tx.send(());
    }

    if resource.role.upstream_kind == UpstreamKind::Dealer {
        if let (Some(socket), Some(symbolic_id)) = (&resource.upstream, resource.role.symbolic_id) {
            if let Err(err) = send_multipart(socket, wire::announce_frames(symbolic_id)) {
                tracing::error!(node = %resource.name, error = %err, "failed to send upstream announce");
                return -1;
            }
        }
    }

    tracing::info!(node = %resource.name, "initializing...done");
    0
}

pub fn configuring(resource: &mut Resource, _payload: &Payload) -> i32 {
    tracing::info!(node = %resource.name, "configuring...");
    resource.liveness = resource.timing.heartbeat_liveness;
    resource.reconnect_interval_ms = resource.timing.interval_init_ms;
    resource.next_heartbeat_due = Instant::now() + Duration::from_millis(resource.timing.heartbeat_interval_ms);
    tracing::info!(node = %resource.name, "configuring...done");
    0
}

pub fn running(resource: &mut Resource, _payload: &Payload) -> i32 {
    let heartbeat_interval = Duration::from_millis(resource.timing.heartbeat_interval_ms);
    let poll_upstream = resource.downstream.is_none() || !resource.peers.is_empty();

    let (downstream_ready, upstream_ready) = match poll_sockets(resource, poll_upstream, heartbeat_interval) {
        Ok(flags) => flags,
        Err(err) => {
            tracing::error!(node = %resource.name, error = %err, "failed to poll sockets");
            return -1;
        }
    };

    if downstream_ready {
        if let Err(err) = service_downstream(resource) {
            tracing::error!(node = %resource.name, error = %err, "error servicing downstream socket");
            return -1;
        }
    }

    let mut saw_upstream_activity = false;
    if upstream_ready {
        match service_upstream(resource) {
            Ok(activity) => saw_upstream_activity = activity,
            Err(err) => {
                tracing::error!(node = %resource.name, error = %err, "error servicing upstream socket");
                return -1;
            }
        }
    }

    if resource.role.upstream_kind == UpstreamKind::Dealer && poll_upstream && !saw_upstream_activity {
        resource.liveness = resource.liveness.saturating_sub(1);
        if resource.liveness == 0 {
            if let Err(err) = reconnect_upstream(resource) {
                tracing::error!(node = %resource.name, error = %err, "failed to reopen upstream socket");
                return -1;
            }
        }
    }

    if Instant::now() >= resource.next_heartbeat_due {
        emit_heartbeats(resource);
        resource.next_heartbeat_due = Instant::now() + heartbeat_interval;
    }

    for peer in resource.peers.purge(Instant::now()) {
        tracing::info!(node = %resource.name, peer = peer.name(), "removing expired peer");
    }

    0
}

pub fn pausing(resource: &mut Resource, _payload: &Payload) -> i32 {
    tracing::info!(node = %resource.name, "pausing");
    0
}

pub fn finalizing(resource: &mut Resource, _payload: &Payload) -> i32 {
    tracing::info!(node = %resource.name, "finalizing...");
    resource.peers = crate::peer::PeerRegistry::new();
    resource.upstream = None;
    resource.downstream = None;
    tracing::info!(node = %resource.name, "finalizing...done");
    0
}

pub fn deleting(resource: &mut Resource, _payload: &Payload) -> i32 {
    tracing::info!(node = %resource.name, "deleting...");
    resource.upstream = None;
    resource.downstream = None;
    tracing::info!(node = %resource.name, "deleting...done");
    0
}

fn open_upstream(ctx: &zmq::Context, role: &crate::role::RoleConfig) -> Result<zmq::Socket, zmq::Error> {
    match role.upstream_kind {
        UpstreamKind::Dealer => {
            let socket = ctx.socket(zmq::DEALER)?;
            socket.connect(&role.upstream_endpoint)?;
            Ok(socket)
        }
        UpstreamKind::ExternalRouter => {
            let socket = ctx.socket(zmq::ROUTER)?;
            socket.bind(&role.upstream_endpoint)?;
            Ok(socket)
        }
    }
}

fn open_router(ctx: &zmq::Context, bind: &str) -> Result<zmq::Socket, zmq::Error> {
    let socket = ctx.socket(zmq::ROUTER)?;
    socket.bind(bind)?;
    Ok(socket)
}

fn send_multipart(socket: &zmq::Socket, frames: Vec<Vec<u8>>) -> Result<(), zmq::Error> {
    socket.send_multipart(frames, 0)
}

/// Polls downstream (if present) unconditionally and upstream only when
/// `poll_upstream` says there is somewhere to route a request to — the Rust
/// form of `plant.c`'s "poll frontend only if we have available lines".
/// Returns `(downstream_has_data, upstream_has_data)`.
fn poll_sockets(
    resource: &Resource,
    poll_upstream: bool,
    timeout: Duration,
) -> Result<(bool, bool), zmq::Error> {
    let mut items = Vec::with_capacity(2);
    if let Some(downstream) = &resource.downstream {
        items.push(downstream.as_poll_item(zmq::POLLIN));
    }
    let upstream_index = items.len();
    if poll_upstream {
        if let Some(upstream) = &resource.upstream {
            items.push(upstream.as_poll_item(zmq::POLLIN));
        }
    }

    zmq::poll(&mut items, timeout.as_millis() as i64)?;

    let downstream_ready = resource.downstream.is_some() && items[0].is_readable();
    let upstream_ready = poll_upstream && resource.upstream.is_some() && items[upstream_index].is_readable();
    Ok((downstream_ready, upstream_ready))
}

/// Services one message on the downstream (child-facing) socket: any sign
/// of life refreshes the sending peer's liveness (`plant.c`'s
/// `s_line_ready`, called unconditionally before the message is even
/// classified); content frames are forwarded upstream unchanged.
fn service_downstream(resource: &mut Resource) -> Result<(), zmq::Error> {
    let socket = resource.downstream.as_ref().expect("downstream polled must exist");
    let mut frames = socket.recv_multipart(0)?;
    if frames.is_empty() {
        return Ok(());
    }
    let identity = frames.remove(0);

    match wire::classify_downstream(frames) {
        Classified::StatusOrReady { symbolic_id, .. } => {
            resource.admit_peer(identity, symbolic_id);
            tracing::info!(node = %resource.name, peer = common::constants::symbolic_id_name(symbolic_id), "RX HB BACKEND");
        }
        Classified::Heartbeat { symbolic_id, state, signal } => {
            resource.admit_peer(identity, symbolic_id);
            tracing::debug!(
                node = %resource.name,
                peer = common::constants::symbolic_id_name(symbolic_id),
                ?state,
                ?signal,
                "RX HB BACKEND"
            );
        }
        Classified::Content(content) => {
            if let Some(upstream) = &resource.upstream {
                send_multipart(upstream, content)?;
            }
        }
    }
    Ok(())
}

/// Services one message on the upstream (parent-facing) socket. Returns
/// whether the message counted as a sign of life (everything does, except
/// the "no peer available to route to" case).
fn service_upstream(resource: &mut Resource) -> Result<bool, zmq::Error> {
    match resource.role.upstream_kind {
        UpstreamKind::ExternalRouter => {
            let socket = resource.upstream.as_ref().expect("upstream polled must exist");
            let mut frames = socket.recv_multipart(0)?;
            if frames.is_empty() {
                return Ok(true);
            }
            match resource.peers.next() {
                Some(peer) => {
                    let mut out = Vec::with_capacity(frames.len() + 1);
                    out.push(peer.identity);
                    out.append(&mut frames);
                    if let Some(downstream) = &resource.downstream {
                        send_multipart(downstream, out)?;
                    }
                }
                None => {
                    tracing::warn!(node = %resource.name, "client request dropped: no peer available to route to");
                }
            }
            Ok(true)
        }
        UpstreamKind::Dealer => {
            let socket = resource.upstream.as_ref().expect("upstream polled must exist");
            let frames = socket.recv_multipart(0)?;
            if frames.is_empty() {
                return Ok(true);
            }
            match wire::classify_upstream(frames) {
                Classified::StatusOrReady { .. } => {
                    tracing::debug!(node = %resource.name, "RX HB FRONTEND");
                    Ok(true)
                }
                Classified::Content(content) => {
                    if resource.downstream.is_some() {
                        match resource.peers.next() {
                            Some(peer) => {
                                let mut out = Vec::with_capacity(content.len() + 1);
                                out.push(peer.identity);
                                out.extend(content);
                                if let Some(downstream) = &resource.downstream {
                                    send_multipart(downstream, out)?;
                                }
                            }
                            None => {
                                tracing::warn!(node = %resource.name, "forwarded request dropped: no peer available to route to");
                            }
                        }
                    } else {
                        // Leaf node: nothing further to delegate to, so this
                        // node is the terminal handler and echoes the
                        // request back as its reply.
                        let socket = resource.upstream.as_ref().expect("checked above");
                        send_multipart(socket, content)?;
                    }
                    Ok(true)
                }
                Classified::Heartbeat { .. } => unreachable!("classify_upstream never returns Heartbeat"),
            }
        }
    }
}

/// Destroys and reopens the upstream socket after `liveness` consecutive
/// empty polls, doubling the backoff interval for next time. Grounded on
/// `line.c`'s reconnect block.
fn reconnect_upstream(resource: &mut Resource) -> Result<(), zmq::Error> {
    tracing::warn!(
        node = %resource.name,
        interval_ms = resource.reconnect_interval_ms,
        "upstream heartbeat failure, reconnecting"
    );
    std::thread::sleep(Duration::from_millis(resource.reconnect_interval_ms));
    resource.reconnect_interval_ms = (resource.reconnect_interval_ms * 2).min(resource.timing.interval_max_ms);

    resource.upstream = None;
    resource.upstream = Some(open_upstream(&resource.ctx, &resource.role)?);
    resource.liveness = resource.timing.heartbeat_liveness;
    Ok(())
}

/// Sends a heartbeat to every known downstream peer (simple 1-byte tag,
/// `plant.c`'s `TX HB BACKEND`) and, for non-root roles, a richer 3-frame
/// status heartbeat upstream naming this node's own state and last signal
/// (the protocol `line.c` itself expects to receive from its own children).
fn emit_heartbeats(resource: &mut Resource) {
    if let Some(downstream) = &resource.downstream {
        for peer in resource.peers.iter() {
            let frames = vec![peer.identity.clone(), wire::heartbeat_tag_frame()];
            if let Err(err) = send_multipart(downstream, frames) {
                tracing::error!(node = %resource.name, error = %err, "failed to send downstream heartbeat");
            } else {
                tracing::debug!(node = %resource.name, peer = peer.name(), "TX HB BACKEND");
            }
        }
    }

    if resource.role.upstream_kind == UpstreamKind::Dealer {
        if let (Some(upstream), Some(symbolic_id)) = (&resource.upstream, resource.role.symbolic_id) {
            let frames = wire::status_heartbeat_frames(symbolic_id, resource.last_state, resource.last_signal);
            if let Err(err) = send_multipart(upstream, frames) {
                tracing::error!(node = %resource.name, error = %err, "failed to send upstream heartbeat");
            } else {
                tracing::debug!(node = %resource.name, "TX HB FRONTEND");
            }
        }
    }
}
