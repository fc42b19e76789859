// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Args;
use rand::rngs::OsRng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::ConnectionArgs;
use crate::crypto::SecureChannel;
use crate::models::{GetInfoResp, TestEcdhParam, TestReq};
use crate::pruntime::{measure, NodeMonitor, PRuntimeClient};

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Poll interval in milliseconds
    #[arg(long, env = "PRUNTIME_POLL_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Stop after this many status updates (runs until Ctrl-C when unset)
    #[arg(long)]
    pub count: Option<u64>,
}

/// Arguments for the test-ecdh command
#[derive(Args, Debug)]
pub struct TestEcdhArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Message to send
    #[arg(long, default_value = "hello pRuntime")]
    pub message: String,
}

/// Fetch node info and join a fresh channel with the node key
pub async fn connect(client: &PRuntimeClient) -> Result<(GetInfoResp, SecureChannel)> {
    let info = client.get_info().await?;
    if info.ecdh_public_key.is_empty() {
        return Err(anyhow!("Node has no ECDH key yet (initialized: {})", info.initialized));
    }
    let mut channel = SecureChannel::create(&mut OsRng);
    channel.join(&info.ecdh_public_key)?;
    Ok((info, channel))
}

pub async fn info(args: InfoArgs) -> Result<()> {
    let (client, config) = args.connection.client()?;
    println!("🔗 Endpoint: {}", config.endpoint);

    let (result, elapsed) = measure(client.get_info()).await;
    let info = result?;

    println!("   Initialized: {}", info.initialized);
    println!("   Block:       {}", info.blocknum);
    println!("   Public key:  {}", info.public_key);
    println!("   ECDH key:    {}", info.ecdh_public_key);
    println!("   Latency:     {} ms", elapsed.as_millis());
    Ok(())
}

pub async fn watch(args: WatchArgs) -> Result<()> {
    let (client, mut config) = args.connection.client()?;
    if let Some(ms) = args.interval_ms {
        config = config.with_poll_interval(Duration::from_millis(ms));
    }

    let channel = SecureChannel::create(&mut OsRng);
    println!("🔑 Local ECDH key: {}", channel.local_public_key_hex());

    let shutdown = CancellationToken::new();
    let monitor = NodeMonitor::new(client, channel, config.poll_interval);
    let (mut handle, task) = monitor.spawn(shutdown.clone());

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping monitor");
            ctrl_c.cancel();
        }
    });

    let mut updates = 0u64;
    while handle.changed().await {
        let status = handle.status();
        let block = status.info.as_ref().map(|i| i.blocknum);
        match &status.last_error {
            None => println!(
                "📊 block={:?} latency={:.1}ms channel={:?}",
                block,
                status.latency_ms.unwrap_or_default(),
                status.channel.state()
            ),
            Some(e) => println!("❌ poll failed: {}", e),
        }

        updates += 1;
        if args.count.map_or(false, |count| updates >= count) {
            shutdown.cancel();
        }
    }

    task.await?;
    Ok(())
}

pub async fn test_ecdh(args: TestEcdhArgs) -> Result<()> {
    let (client, _) = args.connection.client()?;
    let (_, channel) = connect(&client).await?;

    let params = TestReq {
        test_ecdh: Some(TestEcdhParam {
            pubkey_hex: channel.local_public_key_hex(),
            message_b64: STANDARD.encode(args.message.as_bytes()),
        }),
    };
    let response = client.test(&params).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
