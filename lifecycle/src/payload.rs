/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Component C (payload half). A payload item pairs a diagnostic name with
//! an opaque value; handlers consume payloads positionally.

use smallvec::SmallVec;
use std::any::Any;
use std::sync::Arc;

use crate::error::LifecycleError;

/// The opaque value half of a payload item. `Any` is the Rust realisation
/// of "opaque handle" — handlers that know what a given position holds
/// downcast it back to a concrete type.
pub type Value = Arc<dyn Any + Send + Sync>;

pub struct PayloadItem {
    /// Informational/diagnostic only; handlers never branch on this.
    pub name: &'static str,
    pub value: Value,
}

impl std::fmt::Debug for PayloadItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadItem").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Bounded, ordered collection of payload items (capacity P).
#[derive(Debug, Default)]
pub struct Payload {
    items: SmallVec<[PayloadItem; common::constants::PAYLOAD_CAPACITY]>,
}

impl Payload {
    pub fn empty() -> Self {
        Payload { items: SmallVec::new() }
    }

    /// Zips two equal-length sequences of names and values into a payload.
    /// Refuses (logging) rather than panicking if the inputs are
    /// mismatched or exceed capacity P — a malformed call site is a
    /// programming error, not a runtime condition to crash on.
    pub fn zip(
        names: Vec<&'static str>,
        values: Vec<Value>,
    ) -> Result<Payload, LifecycleError> {
        if names.len() != values.len() {
            tracing::error!(
                names = names.len(),
                values = values.len(),
                "payload zip called with mismatched name/value lengths"
            );
            return Err(LifecycleError::PayloadMismatch);
        }
        if names.len() > common::constants::PAYLOAD_CAPACITY {
            tracing::error!(
                len = names.len(),
                capacity = common::constants::PAYLOAD_CAPACITY,
                "payload zip exceeds capacity P"
            );
            return Err(LifecycleError::PayloadOverflow(common::constants::PAYLOAD_CAPACITY));
        }
        let items = names
            .into_iter()
            .zip(values)
            .map(|(name, value)| PayloadItem { name, value })
            .collect();
        Ok(Payload { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PayloadItem> {
        self.items.get(index)
    }

    /// Positional access with a downcast, the shape every handler actually uses.
    pub fn downcast<T: 'static>(&self, index: usize) -> Option<&T> {
        self.get(index)?.value.downcast_ref::<T>()
    }
}
