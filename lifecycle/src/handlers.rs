/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Component D: the state function table. A closed set of state variants
//! maps to handler routines through a dense array indexed by variant
//! rather than a dynamically registered table. Generic over the resource
//! type `R` so this crate stays transport- and role-agnostic; `fabric`
//! supplies the concrete `R` and handler bodies.

use crate::payload::Payload;
use crate::state::State;

/// `(resource, payload) -> status`. Negative status aborts the lifecycle
/// (unwind to pausing→finalizing→deleting); non-negative advances the
/// dispatcher to the next queued transition.
pub type HandlerFn<R> = fn(&mut R, &Payload) -> i32;

pub struct HandlerTable<R> {
    fns: [HandlerFn<R>; 7],
}

impl<R> HandlerTable<R> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        creating: HandlerFn<R>,
        initializing: HandlerFn<R>,
        configuring: HandlerFn<R>,
        running: HandlerFn<R>,
        pausing: HandlerFn<R>,
        finalizing: HandlerFn<R>,
        deleting: HandlerFn<R>,
    ) -> Self {
        HandlerTable {
            fns: [creating, initializing, configuring, running, pausing, finalizing, deleting],
        }
    }

    /// Looks up and runs the handler for `state`.
    pub fn dispatch(&self, state: State, resource: &mut R, payload: &Payload) -> i32 {
        (self.fns[state.index()])(resource, payload)
    }
}
