// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Account address helpers
//!
//! Contracts identify accounts by their 32-byte public key in hex (no `0x`),
//! while users handle SS58 addresses. These helpers convert between them.

use blake2::{Blake2b512, Digest};
use thiserror::Error;

/// Length of a substrate account id
const ACCOUNT_ID_SIZE: usize = 32;

/// Length of the SS58 checksum suffix for 32-byte account ids
const CHECKSUM_SIZE: usize = 2;

/// Domain separator hashed ahead of the SS58 payload
const SS58_CONTEXT: &[u8] = b"SS58PRE";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid base58 address: {0}")]
    InvalidBase58(String),

    #[error("Invalid SS58 address length: {0} bytes")]
    InvalidLength(usize),

    #[error("Reserved SS58 prefix byte: {0}")]
    ReservedPrefix(u8),

    #[error("SS58 checksum mismatch")]
    InvalidChecksum,
}

/// Hex without the `0x` prefix
pub fn u8a_to_hex_compact(data: &[u8]) -> String {
    hex::encode(data)
}

/// Drop a leading `0x`/`0X` if present
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode an SS58 address into the account id hex
///
/// Handles one-byte (0..=63) and two-byte (64..=127) network prefixes and
/// rejects addresses whose blake2b checksum does not match.
pub fn ss58_to_hex(address: &str) -> Result<String, AddressError> {
    let data = bs58::decode(address.trim())
        .into_vec()
        .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;

    let first = *data.first().ok_or(AddressError::InvalidLength(0))?;
    let prefix_len = match first {
        0..=63 => 1,
        64..=127 => 2,
        reserved => return Err(AddressError::ReservedPrefix(reserved)),
    };

    if data.len() != prefix_len + ACCOUNT_ID_SIZE + CHECKSUM_SIZE {
        return Err(AddressError::InvalidLength(data.len()));
    }

    let (payload, checksum) = data.split_at(prefix_len + ACCOUNT_ID_SIZE);
    if checksum != ss58_checksum(payload).as_slice() {
        return Err(AddressError::InvalidChecksum);
    }

    Ok(u8a_to_hex_compact(&payload[prefix_len..]))
}

/// First bytes of `blake2b_512("SS58PRE" ‖ prefix ‖ account_id)`
fn ss58_checksum(payload: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_CONTEXT);
    hasher.update(payload);
    let hash = hasher.finalize();
    [hash[0], hash[1]]
}
