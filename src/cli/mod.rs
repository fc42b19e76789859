// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod node;
pub mod query;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use crate::config::PRuntimeConfig;
use crate::crypto::{Ed25519Signer, QuerySigner};
use crate::pruntime::PRuntimeClient;

/// pRuntime client CLI
#[derive(Parser, Debug)]
#[command(name = "pruntime-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Secure-channel client tools for a pRuntime node", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show node status and latency
    Info(node::InfoArgs),

    /// Poll the node and keep a secure channel joined
    Watch(node::WatchArgs),

    /// Ask the node to check an ECDH message against this client's key
    TestEcdh(node::TestEcdhArgs),

    /// Send an encrypted contract query
    Query(query::QueryArgs),

    /// Build an encrypted balances Transfer command for execution.pushCommand
    TransferCommand(query::TransferArgs),

    /// Print version information
    Version,
}

/// Node connection arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// pRuntime API endpoint
    #[arg(long, env = "PRUNTIME_ENDPOINT")]
    pub endpoint: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "PRUNTIME_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    pub fn config(&self) -> Result<PRuntimeConfig> {
        let mut config = PRuntimeConfig::from_env()?;
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn client(&self) -> Result<(PRuntimeClient, PRuntimeConfig)> {
        let config = self.config()?;
        let client = PRuntimeClient::new(&config)?;
        Ok((client, config))
    }
}

/// Load the ed25519 account key, if a seed was given
pub fn load_signer(seed: Option<&str>) -> Result<Option<Arc<dyn QuerySigner>>> {
    match seed {
        Some(seed) if !seed.trim().is_empty() => {
            let signer = Ed25519Signer::from_seed_hex(seed)
                .map_err(|e| anyhow!("Invalid signer seed: {}", e))?;
            Ok(Some(Arc::new(signer)))
        }
        _ => Ok(None),
    }
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info(args) => node::info(args).await,
        Commands::Watch(args) => node::watch(args).await,
        Commands::TestEcdh(args) => node::test_ecdh(args).await,
        Commands::Query(args) => query::run_query(args).await,
        Commands::TransferCommand(args) => query::transfer_command(args).await,
        Commands::Version => {
            println!("{}", serde_json::to_string_pretty(&crate::version::get_version_info())?);
            Ok(())
        }
    }
}
