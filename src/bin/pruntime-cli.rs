// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use pruntime_client::cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env fallbacks
    dotenv::dotenv().ok();

    // Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}
