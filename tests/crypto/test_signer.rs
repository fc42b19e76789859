// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query signer tests

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pruntime_client::crypto::{verify_ed25519, CryptoError, Ed25519Signer, QuerySigner};
use rand::rngs::OsRng;

const SEED_HEX: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

#[test]
fn test_rfc8032_signature_vector() {
    // RFC 8032 section 7.1, test 1: empty message
    let signer = Ed25519Signer::from_seed_hex(SEED_HEX).unwrap();
    let sig = signer.sign(b"").unwrap();
    assert_eq!(
        hex::encode(sig),
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
         5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
    );
}

#[test]
fn test_sig_type_tag() {
    let signer = Ed25519Signer::generate(&mut OsRng);
    assert_eq!(signer.sig_type(), "ed25519");
    assert_eq!(signer.public_key().len(), 32);
}

#[test]
fn test_verify_rejects_other_key() {
    let signer = Ed25519Signer::generate(&mut OsRng);
    let other = Ed25519Signer::generate(&mut OsRng);
    let sig = STANDARD.encode(signer.sign(b"payload").unwrap());

    let result = verify_ed25519(&hex::encode(other.public_key()), b"payload", &sig);
    assert!(matches!(result, Err(CryptoError::SigningFailed { .. })));
}

#[test]
fn test_verify_accepts_prefixed_key() {
    let signer = Ed25519Signer::generate(&mut OsRng);
    let sig = STANDARD.encode(signer.sign(b"payload").unwrap());
    let key = format!("0x{}", hex::encode(signer.public_key()));
    assert!(verify_ed25519(&key, b"payload", &sig).is_ok());
}

#[test]
fn test_locked_signer() {
    let mut signer = Ed25519Signer::from_seed_hex(SEED_HEX).unwrap();
    signer.lock();
    assert!(signer.is_locked());
    assert_eq!(signer.sign(b"payload"), Err(CryptoError::SignerLocked));
}

#[test]
fn test_trait_object_usage() {
    let signer: Box<dyn QuerySigner> = Box::new(Ed25519Signer::generate(&mut OsRng));
    assert!(!signer.is_locked());
    assert_eq!(signer.sign(b"x").unwrap().len(), 64);
}
