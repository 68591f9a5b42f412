/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Plant: the root supervisory node. Binds an external ROUTER for clients
//! and a backend ROUTER for Lines, and has no upstream liveness/backoff of
//! its own to manage.

use clap::Parser;
use fabric::{RoleConfig, UpstreamKind};

#[derive(Parser, Debug)]
#[command(about = "Pick-and-pack plant controller")]
struct Args {
    /// Node name shown in logs, defaults to "PnP Plant".
    #[arg(default_value = "PnP Plant")]
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::logging::init();
    let args = Args::parse();
    let settings = common::get_settings();

    let role = RoleConfig {
        node_name: args.name,
        upstream_kind: UpstreamKind::ExternalRouter,
        upstream_endpoint: settings.endpoints.plant_external_bind.clone(),
        downstream_bind: Some(settings.endpoints.plant_backend_bind.clone()),
        symbolic_id: None,
        required_peers: Vec::new(),
    };

    tracing::info!(node = %role.node_name, "starting");
    let actor = fabric::spawn(role).await;

    tokio::signal::ctrl_c().await?;
    tracing::info!("interrupt received, shutting down");
    actor.stop().await;
    Ok(())
}
