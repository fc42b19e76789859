// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query envelope protocol
//!
//! Outgoing: `Query<T>` → encrypt over the channel → `{"Cipher": {...}}` in
//! wire convention → JSON string → optional origin signature → `SignedQuery`.
//!
//! Incoming: `Payload` → `Plain` is parsed directly, `Cipher` is decrypted over
//! the channel → typed response.
//!
//! Nothing here retries; a failed query is simply reported to the caller.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{CryptoRng, Rng, RngCore};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use super::error::PRuntimeError;
use crate::crypto::{QuerySigner, SecureChannel};
use crate::models::{from_wire, to_wire, Origin, Payload, Query, SignedQuery};
use crate::utils::address::u8a_to_hex_compact;

/// Exclusive upper bound of query and request nonces
pub const NONCE_RANGE: u32 = 65535;

/// Uniform nonce in `0..65535`; not unique, collisions are accepted
pub fn random_nonce<R: RngCore>(rng: &mut R) -> u32 {
    rng.gen_range(0..NONCE_RANGE)
}

/// Wrap a contract request with its contract id and a fresh nonce
pub fn build_query<R: RngCore, T>(rng: &mut R, contract_id: u32, request: T) -> Query<T> {
    Query {
        contract_id,
        nonce: random_nonce(rng),
        request,
    }
}

/// Encrypt `value` over `channel` and serialize the `{"Cipher": ...}` envelope
///
/// The returned string is the JSON of the wire-convention payload, ready to
/// be signed or pushed on chain.
pub fn encode_payload<R, T>(rng: &mut R, channel: &SecureChannel, value: &T) -> Result<String, PRuntimeError>
where
    R: CryptoRng + RngCore,
    T: Serialize + ?Sized,
{
    let cipher = channel.encrypt_object(rng, value)?;
    let payload = serde_json::to_value(Payload::Cipher(cipher))?;
    Ok(serde_json::to_string(&to_wire(payload))?)
}

/// Encrypt a contract command for `execution.pushCommand`
///
/// The chain stores the encrypted envelope verbatim; only the node holding
/// the channel key can read it.
pub fn encrypt_command<R, C>(rng: &mut R, channel: &SecureChannel, command: &C) -> Result<String, PRuntimeError>
where
    R: CryptoRng + RngCore,
    C: Serialize + ?Sized,
{
    encode_payload(rng, channel, command)
}

/// Attach the caller's origin to an encoded payload
///
/// The signature covers the UTF-8 bytes of `payload_json` exactly as sent.
/// Without a signer the query goes out anonymous and carries no origin.
pub fn sign_query(payload_json: String, signer: Option<&dyn QuerySigner>) -> Result<SignedQuery, PRuntimeError> {
    let origin = match signer {
        Some(signer) => {
            let sig = signer.sign(payload_json.as_bytes())?;
            Some(Origin {
                origin: u8a_to_hex_compact(&signer.public_key()),
                sig_b64: STANDARD.encode(sig),
                sig_type: signer.sig_type().to_string(),
            })
        }
        None => None,
    };

    Ok(SignedQuery {
        query_payload: payload_json,
        origin,
    })
}

/// Encode, encrypt and sign a query in one step
pub fn send<R, T>(
    rng: &mut R,
    channel: &SecureChannel,
    query: &Query<T>,
    signer: Option<&dyn QuerySigner>,
) -> Result<SignedQuery, PRuntimeError>
where
    R: CryptoRng + RngCore,
    T: Serialize,
{
    let payload = encode_payload(rng, channel, query)?;
    debug!(
        contract_id = query.contract_id,
        nonce = query.nonce,
        signed = signer.is_some(),
        "Query encoded"
    );
    sign_query(payload, signer)
}

/// Decode a response payload into `T`
pub fn receive<T: DeserializeOwned>(channel: &SecureChannel, payload: Payload) -> Result<T, PRuntimeError> {
    match payload {
        Payload::Plain(json) => {
            let value: JsonValue = serde_json::from_str(&json)?;
            Ok(serde_json::from_value(from_wire(value))?)
        }
        Payload::Cipher(cipher) => Ok(channel.decrypt_object(&cipher)?),
    }
}

/// Decode an untyped response payload
///
/// `value` is the node's payload document in application convention. Fails
/// with `Decode` when it is neither `{"Plain": ...}` nor `{"Cipher": ...}`.
pub fn decode_payload_value(channel: &SecureChannel, value: JsonValue) -> Result<JsonValue, PRuntimeError> {
    let payload: Payload = serde_json::from_value(value)
        .map_err(|e| PRuntimeError::Decode(format!("unexpected payload envelope: {}", e)))?;
    receive(channel, payload)
}
