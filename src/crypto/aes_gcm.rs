// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-GCM Encryption/Decryption
//!
//! Symmetric AEAD used by the secure channel. Compatible with the Web Crypto
//! API's `AES-GCM` as used by the pRuntime node's counterpart clients.
//!
//! **Format**:
//! - IV: 12 bytes (96 bits), fresh per encryption, transmitted separately
//! - Ciphertext: encrypted data with the 16-byte authentication tag appended
//! - Algorithm: AES-256-GCM
//! - No Additional Authenticated Data (AAD)

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use rand::{CryptoRng, RngCore};

use super::CryptoError;

/// AES-GCM IV length in bytes
pub const IV_SIZE: usize = 12;

/// AES-256 key length in bytes
pub const KEY_SIZE: usize = 32;

/// Generate a fresh random 96-bit IV
///
/// A fresh IV is mandatory for every encryption under the same key. The RNG
/// is supplied by the caller so tests can drive it deterministically.
pub fn generate_iv<R: CryptoRng + RngCore>(rng: &mut R) -> [u8; IV_SIZE] {
    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut iv);
    iv
}

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm, CryptoError> {
    if key.len() != KEY_SIZE {
        return Err(CryptoError::InvalidKey {
            key_type: "aes_gcm_key".to_string(),
            reason: format!("expected {} bytes, got {}", KEY_SIZE, key.len()),
        });
    }

    Aes256Gcm::new_from_slice(key).map_err(|e| CryptoError::InvalidKey {
        key_type: "aes_gcm_key".to_string(),
        reason: e.to_string(),
    })
}

fn check_iv(iv: &[u8]) -> Result<&Nonce<aes_gcm::aead::consts::U12>, CryptoError> {
    if iv.len() != IV_SIZE {
        return Err(CryptoError::InvalidNonce {
            expected_size: IV_SIZE,
            actual_size: iv.len(),
        });
    }
    Ok(Nonce::from_slice(iv))
}

/// Encrypt data using AES-256-GCM
///
/// # Arguments
///
/// * `iv` - 12-byte IV (must be unique for this key)
/// * `key` - 32-byte encryption key
/// * `plaintext` - Data to encrypt
///
/// # Returns
///
/// Ciphertext with the authentication tag appended
pub fn encrypt_aes_gcm(iv: &[u8], key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let nonce = check_iv(iv)?;
    let cipher = cipher_for(key)?;

    cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad: b"",
            },
        )
        .map_err(|e| CryptoError::invalid_payload("plaintext", e))
}

/// Decrypt data encrypted with AES-256-GCM
///
/// # Errors
///
/// - `InvalidNonce` if the IV is not 12 bytes
/// - `InvalidKey` if the key is not 32 bytes
/// - `AuthenticationFailed` if the tag does not verify (tampered data, wrong
///   key, wrong IV) or the ciphertext is shorter than the tag
pub fn decrypt_aes_gcm(iv: &[u8], key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let nonce = check_iv(iv)?;
    let cipher = cipher_for(key)?;

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad: b"",
            },
        )
        .map_err(|_| CryptoError::AuthenticationFailed {
            operation: "decrypt".to_string(),
            reason: "authentication tag verification failed (wrong key or corrupted data)"
                .to_string(),
        })
}
