/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Shared ambient stack for the pick-and-pack supervisory control plane:
//! configuration, design constants and error types used by `lifecycle`,
//! `fabric` and every role binary.

pub mod constants;
pub mod error;
pub mod logging;
pub mod settings;

pub use error::{CommonError, Result};
pub use settings::{get_settings, Settings};
