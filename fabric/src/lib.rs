/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The supervisory messaging fabric: a peer registry with expiry-based
//! liveness and a per-node resource actor built on top of `lifecycle`,
//! talking ZeroMQ ROUTER/DEALER multipart framing.

pub mod actor;
pub mod error;
pub mod handlers;
pub mod peer;
pub mod role;
pub mod wire;

pub use actor::{spawn, ActorHandle, ControlMessage, ControlPipe, Interrupt, Resource};
pub use error::ActorError;
pub use peer::{Peer, PeerRegistry};
pub use role::{RoleConfig, UpstreamKind};
