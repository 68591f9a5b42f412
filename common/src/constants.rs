/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Design constants for the pick-and-pack wire protocol and lifecycle
//! timing. All are overridable via `Settings`; the values here are the
//! defaults the settings layer falls back to.
//!
//! The symbolic-ID byte values pin the 0x08-series per the decision
//! recorded in SPEC_FULL.md / DESIGN.md — the other two conflicting
//! tables historically present in this codebase are not used.

/// Tolerated consecutive heartbeat misses before an upstream is considered dead.
pub const HEARTBEAT_LIVENESS: u32 = 3;
/// Heartbeat cadence and poll timeout, in milliseconds.
pub const HEARTBEAT_INTERVAL_MS: u64 = 1000;
/// Initial reconnect backoff, in milliseconds.
pub const INTERVAL_INIT_MS: u64 = 1000;
/// Reconnect backoff ceiling, in milliseconds.
pub const INTERVAL_MAX_MS: u64 = 32_000;
/// Bound on the run-list depth.
pub const RUN_LIST_DEPTH: usize = 5;
/// Bound on payload item count.
pub const PAYLOAD_CAPACITY: usize = 10;
/// Demo client retry budget.
pub const REQUEST_RETRY_BUDGET: u32 = 3;
/// Demo client per-attempt request timeout, in milliseconds.
pub const REQUEST_TIMEOUT_MS: u64 = 2500;
/// Demo client connect endpoint (the Plant's external bind, dialled).
pub const DEMO_CLIENT_CONNECT: &str = "tcp://localhost:9000";

/// Default endpoints.
pub const PLANT_EXTERNAL_BIND: &str = "tcp://*:9000";
pub const PLANT_BACKEND_BIND: &str = "tcp://*:9001";
pub const LINE_UPSTREAM_CONNECT: &str = "tcp://localhost:9001";
pub const LINE_BACKEND_BIND: &str = "tcp://*:9002";
pub const MODULE_UPSTREAM_CONNECT: &str = "tcp://localhost:9002";
pub const MODULE_BACKEND_BIND: &str = "tcp://*:9003";
pub const DEVICE_UPSTREAM_CONNECT: &str = "tcp://localhost:9003";

/// Protocol tag bytes.
pub const TAG_READY: u8 = 0x01;
pub const TAG_HEARTBEAT: u8 = 0x02;

/// Symbolic-ID byte values, 0x08-series.
pub const ID_LINE: u8 = 0x08;
pub const ID_THERMOFORMER: u8 = 0x09;
pub const ID_ROBOT_CELL: u8 = 0x0A;
pub const ID_QAS: u8 = 0x0B;
pub const ID_CEILING: u8 = 0x0C;
pub const ID_PRINTING: u8 = 0x0D;

/// Renders a symbolic-ID byte as the short human-readable name from the glossary.
pub fn symbolic_id_name(id: u8) -> &'static str {
    match id {
        ID_LINE => "Line",
        ID_THERMOFORMER => "Thermoformer",
        ID_ROBOT_CELL => "Robot Cell",
        ID_QAS => "QAS",
        ID_CEILING => "Ceiling",
        ID_PRINTING => "Printing",
        _ => "unknown",
    }
}

/// Default module/device kind for a node name absent from `Settings`'s
/// `node_kinds` table (the CLI allows no selector flag, so an unlisted
/// name still needs to announce something).
pub const DEFAULT_MODULE_KIND: &str = "qas";

/// Parses a `node_kinds` config value (e.g. `"qas"`, `"robot_cell"`,
/// `"Robot Cell"`) into its symbolic-ID byte, the inverse of
/// `symbolic_id_name`. Case-insensitive; `-` and ` ` are treated as `_`.
pub fn kind_from_name(name: &str) -> Option<u8> {
    let normalized = name.to_ascii_lowercase().replace(['-', ' '], "_");
    match normalized.as_str() {
        "line" => Some(ID_LINE),
        "thermoformer" => Some(ID_THERMOFORMER),
        "robot_cell" => Some(ID_ROBOT_CELL),
        "qas" => Some(ID_QAS),
        "ceiling" => Some(ID_CEILING),
        "printing" => Some(ID_PRINTING),
        _ => None,
    }
}

/// State tag bytes used on heartbeat wire frames.
pub const STATE_TAG_CREATING: u8 = 0x40;
pub const STATE_TAG_INITIALIZING: u8 = 0x41;
pub const STATE_TAG_CONFIGURING: u8 = 0x42;
pub const STATE_TAG_RUNNING: u8 = 0x43;
pub const STATE_TAG_PAUSING: u8 = 0x44;
pub const STATE_TAG_FINALIZING: u8 = 0x45;
pub const STATE_TAG_DELETING: u8 = 0x46;

/// Signal tag bytes used on heartbeat wire frames.
pub const SIGNAL_TAG_RUN: u8 = 0x48;
pub const SIGNAL_TAG_PAUSE: u8 = 0x49;
pub const SIGNAL_TAG_CONFIGURE: u8 = 0x4A;
pub const SIGNAL_TAG_STOP: u8 = 0x4B;
pub const SIGNAL_TAG_REBOOT: u8 = 0x4C;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_id_round_trip_names() {
        assert_eq!(symbolic_id_name(ID_LINE), "Line");
        assert_eq!(symbolic_id_name(ID_QAS), "QAS");
        assert_eq!(symbolic_id_name(0xFF), "unknown");
    }

    #[test]
    fn kind_from_name_accepts_glossary_spellings() {
        assert_eq!(kind_from_name("qas"), Some(ID_QAS));
        assert_eq!(kind_from_name("Robot Cell"), Some(ID_ROBOT_CELL));
        assert_eq!(kind_from_name("robot-cell"), Some(ID_ROBOT_CELL));
        assert_eq!(kind_from_name("nonsense"), None);
    }
}
