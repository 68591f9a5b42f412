/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Component G: node role configuration. Each role binary (`plant`,
//! `line`, `module`, `device`) builds one of these and hands it to
//! `ResourceActor::spawn` — the actor itself is role-agnostic; only the
//! endpoint bindings, symbolic ID and required-peer list differ.

/// How the "upstream" socket behaves. Plant has no parent: its upstream
/// socket is a ROUTER serving external clients, with no liveness/backoff
/// concept. Every other role dealer-connects to a real parent and
/// heartbeats/reconnects against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// Root role: ROUTER accepting external client requests.
    ExternalRouter,
    /// Non-root role: DEALER connected to the parent node.
    Dealer,
}

#[derive(Debug, Clone)]
pub struct RoleConfig {
    pub node_name: String,
    pub upstream_kind: UpstreamKind,
    pub upstream_endpoint: String,
    pub downstream_bind: Option<String>,
    /// Symbolic ID this node announces to its parent. `None` for Plant,
    /// which has no parent to announce to.
    pub symbolic_id: Option<u8>,
    /// Downstream symbolic IDs that should be present before this role
    /// proceeds past configuring. Diagnostic only in this version — not
    /// consulted as a gate.
    pub required_peers: Vec<u8>,
}
