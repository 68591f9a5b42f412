/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Errors surfaced by the resource actor's transport plumbing. A handler
//! returning a negative status is not modeled as an error here — that is
//! ordinary dispatcher control flow, not a failure the actor needs to
//! report out.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("bootstrap payload could not be built: {0}")]
    Bootstrap(#[from] lifecycle::LifecycleError),
}
