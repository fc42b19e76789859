// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::{Args, Subcommand};
use rand::rngs::OsRng;
use serde_json::Value as JsonValue;

use super::node::connect;
use super::{load_signer, ConnectionArgs};
use crate::crypto::{QuerySigner, SecureChannel};
use crate::models::{
    AssetsRequest, AssetsResponse, BalancesCommand, BalancesRequest, BalancesResponse,
    ReceiptRequest, ReceiptResponse, ASSETS_CONTRACT_ID, BALANCES_CONTRACT_ID,
};
use crate::pruntime::{encrypt_command, PRuntimeClient};
use crate::utils::address::{ss58_to_hex, strip_hex_prefix};

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Ed25519 seed (hex) used to sign the query origin
    #[arg(long, env = "PRUNTIME_SIGNER_SEED")]
    pub signer_seed: Option<String>,

    #[command(subcommand)]
    pub target: QueryTarget,
}

#[derive(Subcommand, Debug)]
pub enum QueryTarget {
    /// Total issuance of the native token
    TotalIssuance,

    /// Free balance of an account
    FreeBalance {
        /// SS58 address or hex account id
        account: String,
    },

    /// Metadata of every asset
    Assets,

    /// Total supply of one asset
    TotalSupply { id: u32 },

    /// Balance of an account in one asset
    AssetBalance {
        id: u32,
        /// SS58 address or hex account id
        account: String,
    },

    /// Assets held by the signing account
    ListAssets {
        #[arg(long)]
        available_only: bool,
    },

    /// Receipt of a pushed command
    Receipt {
        /// SS58 address or hex account id
        account: String,
        tx_hash: String,
        /// Contract the command was pushed to
        #[arg(long, default_value_t = BALANCES_CONTRACT_ID)]
        contract_id: u32,
    },
}

/// Arguments for the transfer-command command
#[derive(Args, Debug)]
pub struct TransferArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Recipient, SS58 address or hex account id
    pub dest: String,

    /// Amount in the smallest unit
    pub value: String,
}

/// Accept either an SS58 address or a hex account id
pub fn resolve_account(account: &str) -> Result<String> {
    let trimmed = account.trim();
    let stripped = strip_hex_prefix(trimmed);
    if stripped.len() == 64 && hex::decode(stripped).is_ok() {
        return Ok(stripped.to_ascii_lowercase());
    }
    Ok(ss58_to_hex(trimmed)?)
}

pub async fn run_query(args: QueryArgs) -> Result<()> {
    let (client, _) = args.connection.client()?;
    let signer = load_signer(args.signer_seed.as_deref())?;
    let (_, channel) = connect(&client).await?;

    let signer_ref = signer.as_deref();
    let response = match args.target {
        QueryTarget::TotalIssuance => {
            balances(&client, &channel, BalancesRequest::TotalIssuance, signer_ref).await?
        }
        QueryTarget::FreeBalance { account } => {
            let account = resolve_account(&account)?;
            balances(&client, &channel, BalancesRequest::FreeBalance { account }, signer_ref).await?
        }
        QueryTarget::Assets => assets(&client, &channel, AssetsRequest::Metadata, signer_ref).await?,
        QueryTarget::TotalSupply { id } => {
            assets(&client, &channel, AssetsRequest::TotalSupply { id }, signer_ref).await?
        }
        QueryTarget::AssetBalance { id, account } => {
            let account = resolve_account(&account)?;
            assets(&client, &channel, AssetsRequest::Balance { id, account }, signer_ref).await?
        }
        QueryTarget::ListAssets { available_only } => {
            assets(&client, &channel, AssetsRequest::ListAssets { available_only }, signer_ref).await?
        }
        QueryTarget::Receipt {
            account,
            tx_hash,
            contract_id,
        } => {
            let request = ReceiptRequest::QueryReceipt {
                account: resolve_account(&account)?,
                tx_hash: strip_hex_prefix(tx_hash.trim()).to_string(),
            };
            let response: ReceiptResponse = client
                .query(contract_id, request, &channel, signer_ref)
                .await?;
            serde_json::to_value(response)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn balances(
    client: &PRuntimeClient,
    channel: &SecureChannel,
    request: BalancesRequest,
    signer: Option<&dyn QuerySigner>,
) -> Result<JsonValue> {
    let response: BalancesResponse = client
        .query(BALANCES_CONTRACT_ID, request, channel, signer)
        .await?;
    Ok(serde_json::to_value(response)?)
}

async fn assets(
    client: &PRuntimeClient,
    channel: &SecureChannel,
    request: AssetsRequest,
    signer: Option<&dyn QuerySigner>,
) -> Result<JsonValue> {
    let response: AssetsResponse = client
        .query(ASSETS_CONTRACT_ID, request, channel, signer)
        .await?;
    Ok(serde_json::to_value(response)?)
}

pub async fn transfer_command(args: TransferArgs) -> Result<()> {
    let (client, _) = args.connection.client()?;
    let (_, channel) = connect(&client).await?;

    let command = BalancesCommand::Transfer {
        dest: resolve_account(&args.dest)?,
        value: args.value,
    };
    let encrypted = encrypt_command(&mut OsRng, &channel, &command)?;

    println!("contract_id: {}", BALANCES_CONTRACT_ID);
    println!("command:     {}", encrypted);
    Ok(())
}
