// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Typed requests and responses of the pRuntime demo contracts
//!
//! Variants serialize with serde's external tagging, which yields exactly the
//! PascalCase discriminants the node expects (`"TotalIssuance"`,
//! `{"FreeBalance": {...}}`). Amounts are decimal strings.

use serde::{Deserialize, Serialize};

/// Contract id of the balances contract
pub const BALANCES_CONTRACT_ID: u32 = 2;

/// Contract id of the assets contract
pub const ASSETS_CONTRACT_ID: u32 = 3;

/// Balances contract queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum BalancesRequest {
    TotalIssuance,
    /// `account` is the 32-byte account id as hex
    FreeBalance { account: String },
}

/// Balances contract responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum BalancesResponse {
    TotalIssuance { total_issuance: String },
    FreeBalance { balance: String },
    Error(String),
}

/// Balances contract commands, pushed on chain through `execution.pushCommand`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum BalancesCommand {
    /// `dest` is the recipient account id as hex, `value` a decimal amount
    Transfer { dest: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    pub owner: String,
    pub total_supply: String,
    pub symbol: String,
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadataBalance {
    pub metadata: AssetMetadata,
    pub balance: String,
}

/// Assets contract queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum AssetsRequest {
    Metadata,
    TotalSupply { id: u32 },
    Balance { id: u32, account: String },
    ListAssets { available_only: bool },
}

/// Assets contract responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum AssetsResponse {
    Metadata { metadata: Vec<AssetMetadata> },
    TotalSupply { total_supply: String },
    Balance { balance: String },
    ListAssets { assets: Vec<AssetMetadataBalance> },
    Error(String),
}

impl AssetsResponse {
    /// Find an asset by id in a `Metadata` response
    pub fn find_asset(&self, id: u32) -> Option<&AssetMetadata> {
        match self {
            AssetsResponse::Metadata { metadata } => metadata.iter().find(|m| m.id == id),
            _ => None,
        }
    }
}

/// Receipt lookup for a previously pushed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum ReceiptRequest {
    QueryReceipt { account: String, tx_hash: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub account: String,
    pub block_num: u64,
    /// The original command JSON
    pub command: String,
    pub contract_id: u32,
    pub status: String,
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum ReceiptResponse {
    QueryReceipt { receipt: Receipt },
    Error(String),
}
