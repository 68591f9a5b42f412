/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The resource lifecycle engine: a uniform state machine (transition
//! table, path planner, transition/payload model and state function
//! table) shared by every node role. Transport-agnostic by design —
//! nothing here knows about sockets, peers or the actor loop; `fabric`
//! builds on top of it.

pub mod error;
pub mod handlers;
pub mod payload;
pub mod planner;
pub mod state;
pub mod table;
pub mod transition;

pub use error::LifecycleError;
pub use handlers::{HandlerFn, HandlerTable};
pub use payload::{Payload, PayloadItem, Value};
pub use state::{Signal, State};
pub use transition::{RunList, Transition};
