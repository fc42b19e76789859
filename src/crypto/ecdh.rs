// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Key Exchange Implementation
//!
//! Implements Elliptic Curve Diffie-Hellman key exchange on NIST P-256, the
//! curve the pRuntime node uses for its channel key. The raw x-coordinate of
//! the shared point is used directly as the AES-256-GCM key, without a KDF,
//! matching the node's Web Crypto counterpart (`deriveKey` ECDH → AES-GCM).

use std::fmt;

use p256::{
    elliptic_curve::sec1::ToEncodedPoint, pkcs8::EncodePrivateKey, PublicKey, SecretKey,
};
use rand::{CryptoRng, RngCore};

use super::CryptoError;
use crate::utils::address::strip_hex_prefix;

/// Length of a SEC1 uncompressed P-256 point (0x04 || x || y)
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// Symmetric key agreed through ECDH
///
/// Only ever used as AES-GCM key material. `Debug` never prints the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedKey([u8; 32]);

impl SharedKey {
    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedKey(<redacted>)")
    }
}

/// Ephemeral P-256 key pair owned by a secure channel
#[derive(Clone)]
pub struct EcdhKeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl EcdhKeyPair {
    /// Generate a fresh key pair from the supplied RNG
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let secret = SecretKey::random(rng);
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Public key as a 65-byte SEC1 uncompressed point
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.public.to_encoded_point(false).as_bytes().to_vec()
    }

    /// Public key as lowercase hex without `0x`
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// Export the private key as PKCS#8 DER, hex encoded
    ///
    /// For diagnostic display only. Nothing on the protocol path calls this.
    pub fn export_private_pkcs8_hex(&self) -> Result<String, CryptoError> {
        let document = self
            .secret
            .to_pkcs8_der()
            .map_err(|e| CryptoError::InvalidKey {
                key_type: "local_ecdh_private_key".to_string(),
                reason: format!("PKCS#8 export failed: {}", e),
            })?;
        Ok(hex::encode(document.as_bytes()))
    }

    /// Derive the shared key with the counterparty's public key
    pub fn derive_shared_key(&self, remote: &PublicKey) -> SharedKey {
        derive_shared_key(&self.secret, remote)
    }
}

impl fmt::Debug for EcdhKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdhKeyPair")
            .field("public", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

/// Import a remote public key from its SEC1 encoding
///
/// Accepts compressed (33 bytes) and uncompressed (65 bytes) points.
///
/// # Errors
///
/// `InvalidKey` if the bytes are not a valid point on P-256.
pub fn import_public_key(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    if bytes.len() != 33 && bytes.len() != UNCOMPRESSED_PUBLIC_KEY_SIZE {
        return Err(CryptoError::InvalidKey {
            key_type: "remote_ecdh_public_key".to_string(),
            reason: format!("expected 33 or 65 bytes, got {}", bytes.len()),
        });
    }

    PublicKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidKey {
        key_type: "remote_ecdh_public_key".to_string(),
        reason: "not a valid P-256 point".to_string(),
    })
}

/// Parse a hex encoded public key as reported by the node
///
/// The node reports its key without `0x`; a prefix is tolerated.
pub fn parse_public_key_hex(hex_key: &str) -> Result<PublicKey, CryptoError> {
    let bytes = hex::decode(strip_hex_prefix(hex_key.trim())).map_err(|e| {
        CryptoError::InvalidKey {
            key_type: "remote_ecdh_public_key".to_string(),
            reason: format!("hex decode error: {}", e),
        }
    })?;
    import_public_key(&bytes)
}

/// Derive a shared AES-256 key using ECDH
///
/// Standard ECDH followed by using the shared point's x-coordinate directly
/// as key material. Deterministic for the same pair of keys.
pub fn derive_shared_key(local: &SecretKey, remote: &PublicKey) -> SharedKey {
    let shared = p256::ecdh::diffie_hellman(local.to_nonzero_scalar(), remote.as_affine());
    let mut key = [0u8; 32];
    key.copy_from_slice(shared.raw_secret_bytes().as_slice());
    SharedKey(key)
}
