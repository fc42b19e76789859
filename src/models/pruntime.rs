// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! pRuntime protocol models
//!
//! Field names here are in the application convention (camelCase). They are
//! converted to the wire convention by [`super::case`] on the way out and back
//! on the way in.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Node status reported by `get_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetInfoResp {
    pub initialized: bool,
    pub blocknum: u64,
    pub public_key: String,
    /// Node's channel key, hex without `0x`
    pub ecdh_public_key: String,
}

/// One AES-GCM encrypted blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AeadCipher {
    pub iv_b64: String,
    pub cipher_b64: String,
    /// Sender's uncompressed ECDH public key
    pub pubkey_b64: String,
}

/// Plain or encrypted payload envelope
///
/// The client only ever produces `Cipher`; `Plain` is accepted in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Plain(String),
    Cipher(AeadCipher),
}

/// A contract query before encryption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query<T> {
    pub contract_id: u32,
    /// Random, not unique; collisions are accepted
    pub nonce: u32,
    pub request: T,
}

/// Caller authentication attached to a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    /// Signer public key, hex without `0x`
    pub origin: String,
    pub sig_b64: String,
    pub sig_type: String,
}

/// Transport envelope for the `query` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedQuery {
    /// JSON of the wire-convention `Payload`
    pub query_payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

/// Outer request nonce, `{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestNonce {
    pub id: u32,
}

/// Outer request body posted to every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Endpoint parameters, already in wire convention
    pub input: JsonValue,
    pub nonce: RequestNonce,
}

/// Status string used by the node for successful responses
pub const STATUS_OK: &str = "ok";

/// Outer response body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// JSON document, itself in wire convention
    pub payload: String,
    /// Node signature over `payload`. Not verified by this client.
    #[serde(default)]
    pub signature: String,
    pub status: String,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Parameters of the diagnostic `test` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_ecdh: Option<TestEcdhParam>,
}

/// Asks the node to decrypt-check a message against a channel public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEcdhParam {
    pub pubkey_hex: String,
    pub message_b64: String,
}
