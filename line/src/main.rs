/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Line: dealer-connects up to the Plant, binds a backend ROUTER for its
//! Modules. Lists QAS and Printing as the downstream peers it expects
//! before it considers itself fully staffed (diagnostic only — see
//! `RoleConfig::required_peers`).

use clap::Parser;
use fabric::{RoleConfig, UpstreamKind};

#[derive(Parser, Debug)]
#[command(about = "Pick-and-pack line controller")]
struct Args {
    /// Node name shown in logs, defaults to "PnP Line".
    #[arg(default_value = "PnP Line")]
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::logging::init();
    let args = Args::parse();
    let settings = common::get_settings();

    let role = RoleConfig {
        node_name: args.name,
        upstream_kind: UpstreamKind::Dealer,
        upstream_endpoint: settings.endpoints.line_upstream_connect.clone(),
        downstream_bind: Some(settings.endpoints.line_backend_bind.clone()),
        symbolic_id: Some(common::constants::ID_LINE),
        required_peers: vec![common::constants::ID_QAS, common::constants::ID_PRINTING],
    };

    tracing::info!(node = %role.node_name, "starting");
    let actor = fabric::spawn(role).await;

    tokio::signal::ctrl_c().await?;
    tracing::info!("interrupt received, shutting down");
    actor.stop().await;
    Ok(())
}
