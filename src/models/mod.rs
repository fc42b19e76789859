// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Data models exchanged with the pRuntime node
//!
//! - `case`: camelCase ↔ snake_case key transcoding for the wire
//! - `pruntime`: endpoint and envelope types
//! - `contracts`: typed requests/responses of the demo contracts

pub mod case;
pub mod contracts;
pub mod pruntime;

pub use case::{from_wire, to_wire};
pub use contracts::{
    AssetMetadata, AssetMetadataBalance, AssetsRequest, AssetsResponse, BalancesCommand,
    BalancesRequest, BalancesResponse, Receipt, ReceiptRequest, ReceiptResponse,
    ASSETS_CONTRACT_ID, BALANCES_CONTRACT_ID,
};
pub use pruntime::{
    AeadCipher, ApiResponse, GetInfoResp, Origin, Payload, Query, RequestEnvelope, RequestNonce,
    SignedQuery, TestEcdhParam, TestReq,
};
