/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

use thiserror::Error;

/// Programming-error conditions: logged, and the offending operation is
/// refused, but these never unwind a running actor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("payload zip called with mismatched name/value lengths")]
    PayloadMismatch,

    #[error("payload capacity exceeded: refusing to add past {0} items")]
    PayloadOverflow(usize),

    #[error("run-list overflow: refusing to push past depth {0}")]
    RunListOverflow(usize),
}
