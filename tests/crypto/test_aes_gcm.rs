// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Tests for AES-256-GCM encryption
// Format matches Web Crypto API's AES-GCM (ciphertext || 16-byte tag, no AAD)

use pruntime_client::crypto::{decrypt_aes_gcm, encrypt_aes_gcm, generate_iv, CryptoError};
use rand::rngs::OsRng;
use rand::RngCore;

fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

#[test]
fn test_roundtrip_various_sizes() {
    let key = random_key();
    for size in [0usize, 1, 15, 16, 17, 1024, 65_536] {
        let mut plaintext = vec![0u8; size];
        OsRng.fill_bytes(&mut plaintext);
        let iv = generate_iv(&mut OsRng);

        let ciphertext = encrypt_aes_gcm(&iv, &key, &plaintext).unwrap();
        assert_eq!(ciphertext.len(), size + 16, "tag is appended");

        let decrypted = decrypt_aes_gcm(&iv, &key, &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn test_encrypt_is_deterministic_for_same_iv() {
    let key = random_key();
    let iv = [7u8; 12];
    let a = encrypt_aes_gcm(&iv, &key, b"same input").unwrap();
    let b = encrypt_aes_gcm(&iv, &key, b"same input").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_bit_flip_fails_authentication() {
    let key = random_key();
    let iv = generate_iv(&mut OsRng);
    let ciphertext = encrypt_aes_gcm(&iv, &key, b"{\"TotalIssuance\":null}").unwrap();

    for index in [0, ciphertext.len() / 2, ciphertext.len() - 1] {
        let mut corrupted = ciphertext.clone();
        corrupted[index] ^= 0x01;
        let result = decrypt_aes_gcm(&iv, &key, &corrupted);
        assert!(
            matches!(result, Err(CryptoError::AuthenticationFailed { .. })),
            "flipping byte {} must fail authentication",
            index
        );
    }
}

#[test]
fn test_wrong_key_fails_authentication() {
    let iv = generate_iv(&mut OsRng);
    let ciphertext = encrypt_aes_gcm(&iv, &random_key(), b"secret").unwrap();
    let result = decrypt_aes_gcm(&iv, &random_key(), &ciphertext);
    assert!(matches!(result, Err(CryptoError::AuthenticationFailed { .. })));
}

#[test]
fn test_truncated_ciphertext_fails() {
    let key = random_key();
    let iv = generate_iv(&mut OsRng);
    let result = decrypt_aes_gcm(&iv, &key, &[0u8; 8]);
    assert!(matches!(result, Err(CryptoError::AuthenticationFailed { .. })));
}

#[test]
fn test_invalid_iv_length() {
    let key = random_key();
    let result = decrypt_aes_gcm(&[0u8; 16], &key, &[0u8; 32]);
    assert_eq!(
        result.unwrap_err(),
        CryptoError::InvalidNonce {
            expected_size: 12,
            actual_size: 16
        }
    );
}

#[test]
fn test_invalid_key_length() {
    let iv = generate_iv(&mut OsRng);
    let result = encrypt_aes_gcm(&iv, &[0u8; 16], b"data");
    assert!(matches!(result, Err(CryptoError::InvalidKey { .. })));
}

#[test]
fn test_ivs_are_fresh() {
    let a = generate_iv(&mut OsRng);
    let b = generate_iv(&mut OsRng);
    assert_ne!(a, b);
}
