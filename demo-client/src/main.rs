/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! A minimal Paranoid Pirate client: sends an incrementing sequence number
//! to a running plant and expects it echoed back, retrying with a fresh
//! socket on timeout. Grounded directly on `client.c`.

fn new_client(ctx: &zmq::Context, connect: &str) -> anyhow::Result<zmq::Socket> {
    let socket = ctx.socket(zmq::DEALER)?;
    socket.connect(connect)?;
    Ok(socket)
}

fn main() -> anyhow::Result<()> {
    common::logging::init();
    let settings = common::get_settings();
    let demo = &settings.demo_client;

    tracing::info!(endpoint = %demo.connect, "connecting to plant");
    let ctx = zmq::Context::new();
    let mut client = new_client(&ctx, &demo.connect)?;

    let mut sequence: u32 = 0;
    let mut retries_left = demo.retry_budget;

    while retries_left > 0 {
        sequence += 1;
        let request = sequence.to_string();
        tracing::info!(request = %request, "sending request");
        client.send(request.as_bytes(), 0)?;

        let mut expect_reply = true;
        while expect_reply {
            let mut items = [client.as_poll_item(zmq::POLLIN)];
            if zmq::poll(&mut items, demo.request_timeout_ms as i64).is_err() {
                tracing::warn!("interrupted while polling for a reply");
                return Ok(());
            }

            if items[0].is_readable() {
                let reply = client.recv_string(0)?.ok();
                match reply.as_deref().and_then(|r| r.parse::<u32>().ok()) {
                    Some(got) if got == sequence => {
                        tracing::info!(reply = got, "plant replied");
                        retries_left = demo.retry_budget;
                        expect_reply = false;
                    }
                    _ => {
                        tracing::warn!(?reply, "malformed reply from plant");
                    }
                }
            } else {
                retries_left -= 1;
                if retries_left == 0 {
                    tracing::error!("plant seems to be offline, abandoning");
                    break;
                }
                tracing::warn!("no response from plant, retrying with a fresh socket");
                client = new_client(&ctx, &demo.connect)?;
                client.send(request.as_bytes(), 0)?;
            }
        }
    }

    Ok(())
}
