// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query Signing
//!
//! Authenticates the caller of a query. The account keystore is external to
//! this crate; it is consumed through the [`QuerySigner`] capability. An
//! ed25519 implementation is provided for CLI use and tests.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::{CryptoRng, RngCore};

use super::CryptoError;
use crate::utils::address::strip_hex_prefix;

/// Account key able to sign queries
///
/// `sig_type` is an opaque scheme tag forwarded to the node
/// (e.g. "sr25519", "ed25519").
pub trait QuerySigner: Send + Sync {
    /// Raw public key bytes
    fn public_key(&self) -> Vec<u8>;

    /// Signature scheme tag
    fn sig_type(&self) -> &str;

    /// Locked accounts cannot sign
    fn is_locked(&self) -> bool {
        false
    }

    /// Sign `message`, failing with `SignerLocked` while locked
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Ed25519 account key
pub struct Ed25519Signer {
    signing_key: SigningKey,
    locked: bool,
}

impl Ed25519Signer {
    pub fn new(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            locked: false,
        }
    }

    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::new(SigningKey::generate(rng))
    }

    /// Build from a 32-byte seed given as hex (optional `0x`)
    pub fn from_seed_hex(seed_hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(strip_hex_prefix(seed_hex.trim())).map_err(|e| {
            CryptoError::InvalidKey {
                key_type: "signer_seed".to_string(),
                reason: format!("hex decode error: {}", e),
            }
        })?;
        let seed: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKey {
                key_type: "signer_seed".to_string(),
                reason: format!("expected 32 bytes, got {}", bytes.len()),
            })?;
        Ok(Self::new(SigningKey::from_bytes(&seed)))
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }
}

impl QuerySigner for Ed25519Signer {
    fn public_key(&self) -> Vec<u8> {
        self.signing_key.verifying_key().to_bytes().to_vec()
    }

    fn sig_type(&self) -> &str {
        "ed25519"
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if self.locked {
            return Err(CryptoError::SignerLocked);
        }
        Ok(self.signing_key.sign(message).to_bytes().to_vec())
    }
}

/// Verify an ed25519 query origin
///
/// # Arguments
///
/// * `pubkey_hex` - Signer public key, hex with or without `0x`
/// * `message` - Signed bytes (the UTF-8 query payload)
/// * `sig_b64` - Base64 signature
pub fn verify_ed25519(pubkey_hex: &str, message: &[u8], sig_b64: &str) -> Result<(), CryptoError> {
    let pubkey_bytes = hex::decode(strip_hex_prefix(pubkey_hex))?;
    let pubkey: [u8; 32] = pubkey_bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidKey {
            key_type: "ed25519_public_key".to_string(),
            reason: format!("expected 32 bytes, got {}", pubkey_bytes.len()),
        })?;
    let verifying_key = VerifyingKey::from_bytes(&pubkey).map_err(|e| CryptoError::InvalidKey {
        key_type: "ed25519_public_key".to_string(),
        reason: e.to_string(),
    })?;

    let sig_bytes = STANDARD.decode(sig_b64)?;
    let signature = Signature::from_slice(&sig_bytes).map_err(|e| CryptoError::SigningFailed {
        reason: format!("malformed signature: {}", e),
    })?;

    verifying_key
        .verify(message, &signature)
        .map_err(|e| CryptoError::SigningFailed {
            reason: format!("signature verification failed: {}", e),
        })
}
