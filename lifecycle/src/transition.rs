/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Component C (transition half) and the run-list.

use crate::error::LifecycleError;
use crate::payload::Payload;
use crate::state::State;

/// A planned move to a named state with a keyed payload.
#[derive(Debug)]
pub struct Transition {
    pub target: State,
    pub payload: Payload,
}

impl Transition {
    pub fn new(target: State, payload: Payload) -> Self {
        Transition { target, payload }
    }
}

/// A bounded LIFO of pending transitions (depth S). `push` refuses and
/// logs rather than exceeding the bound — overflow is a programming
/// error, not a runtime condition.
#[derive(Debug, Default)]
pub struct RunList {
    items: Vec<Transition>,
    depth: usize,
}

impl RunList {
    pub fn new() -> Self {
        RunList::with_depth(common::constants::RUN_LIST_DEPTH)
    }

    pub fn with_depth(depth: usize) -> Self {
        RunList { items: Vec::with_capacity(depth), depth }
    }

    /// Pushes a transition so it becomes the next one popped. Returns
    /// `Err` without mutating the list if the bound would be exceeded.
    pub fn push(&mut self, transition: Transition) -> Result<(), LifecycleError> {
        if self.items.len() >= self.depth {
            tracing::error!(depth = self.depth, "run-list overflow, refusing push");
            return Err(LifecycleError::RunListOverflow(self.depth));
        }
        self.items.push(transition);
        Ok(())
    }

    /// Pops the next transition to execute, or `None` when the run-list is
    /// empty (a valid, non-error terminal condition).
    pub fn pop(&mut self) -> Option<Transition> {
        self.items.pop()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drains `other` onto the top of `self`, preserving `other`'s own pop
    /// order: popping `self` afterwards yields `other`'s transitions first,
    /// in the order `other` would have yielded them, then whatever was
    /// already in `self`. Used when a freshly injected signal is re-expanded
    /// mid-dispatch.
    pub fn push_all(&mut self, mut other: RunList) {
        let mut collected = Vec::with_capacity(other.len());
        while let Some(transition) = other.pop() {
            collected.push(transition);
        }
        for transition in collected.into_iter().rev() {
            if self.push(transition).is_err() {
                tracing::error!("run-list overflow while merging re-expanded signal");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payload;

    #[test]
    fn push_refuses_past_depth() {
        let mut run_list = RunList::with_depth(2);
        run_list.push(Transition::new(State::Initializing, Payload::empty())).unwrap();
        run_list.push(Transition::new(State::Configuring, Payload::empty())).unwrap();
        let err = run_list
            .push(Transition::new(State::Running, Payload::empty()))
            .unwrap_err();
        assert_eq!(err, LifecycleError::RunListOverflow(2));
        assert_eq!(run_list.len(), 2);
    }

    #[test]
    fn pop_order_is_lifo() {
        let mut run_list = RunList::new();
        run_list.push(Transition::new(State::Initializing, Payload::empty())).unwrap();
        run_list.push(Transition::new(State::Configuring, Payload::empty())).unwrap();
        assert_eq!(run_list.pop().unwrap().target, State::Configuring);
        assert_eq!(run_list.pop().unwrap().target, State::Initializing);
        assert!(run_list.pop().is_none());
    }

    #[test]
    fn push_all_preserves_others_pop_order_ahead_of_existing_items() {
        let mut run_list = RunList::new();
        run_list.push(Transition::new(State::Deleting, Payload::empty())).unwrap();

        // fresh's own pop order (LIFO) is Running, Configuring, Initializing.
        let mut fresh = RunList::new();
        fresh.push(Transition::new(State::Initializing, Payload::empty())).unwrap();
        fresh.push(Transition::new(State::Configuring, Payload::empty())).unwrap();
        fresh.push(Transition::new(State::Running, Payload::empty())).unwrap();

        run_list.push_all(fresh);

        assert_eq!(run_list.pop().unwrap().target, State::Running);
        assert_eq!(run_list.pop().unwrap().target, State::Configuring);
        assert_eq!(run_list.pop().unwrap().target, State::Initializing);
        assert_eq!(run_list.pop().unwrap().target, State::Deleting);
        assert!(run_list.pop().is_none());
    }
}
