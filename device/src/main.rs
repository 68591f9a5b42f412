/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Device: a leaf node. Dealer-connects up to a Module and has no backend
//! of its own — it is the terminal handler for whatever work arrives. The
//! symbolic-ID it announces comes from `Settings::node_kinds`, keyed by
//! this process's node name, rather than a CLI flag (the CLI surface
//! allows only the optional node-name argument).

use clap::Parser;
use fabric::{RoleConfig, UpstreamKind};

#[derive(Parser, Debug)]
#[command(about = "Pick-and-pack device controller")]
struct Args {
    /// Node name shown in logs, defaults to "PnP Device". Also the key
    /// used to look up this process's kind in `Settings::node_kinds`.
    #[arg(default_value = "PnP Device")]
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::logging::init();
    let args = Args::parse();
    let settings = common::get_settings();
    let symbolic_id = settings.symbolic_id_for_node(&args.name);

    let role = RoleConfig {
        node_name: args.name,
        upstream_kind: UpstreamKind::Dealer,
        upstream_endpoint: settings.endpoints.device_upstream_connect.clone(),
        downstream_bind: None,
        symbolic_id: Some(symbolic_id),
        required_peers: Vec::new(),
    };

    tracing::info!(node = %role.node_name, kind = common::constants::symbolic_id_name(symbolic_id), "starting");
    let actor = fabric::spawn(role).await;

    tokio::signal::ctrl_c().await?;
    tracing::info!("interrupt received, shutting down");
    actor.stop().await;
    Ok(())
}
