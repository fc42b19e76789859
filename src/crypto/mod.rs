// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Secure Channel Cryptography
//!
//! This module implements the cryptographic primitives used to talk to a
//! pRuntime node confidentially:
//!
//! - **ECDH**: Ephemeral key exchange on NIST P-256
//! - **AES-GCM**: AES-256-GCM AEAD with a fresh 96-bit IV per message
//! - **Channel**: Stateful pairing of the local key pair with the node's key
//! - **Signer**: Caller authentication for queries
//!
//! ## Security Considerations
//!
//! - Channel keys live in memory only and die with the channel
//! - IVs are drawn from the caller's CSPRNG for every encryption
//! - The raw ECDH x-coordinate is the AES key (no KDF), as the node expects
//!
//! ## Protocol Flow
//!
//! 1. Client creates a channel (generates an ephemeral key pair)
//! 2. Client reads the node's ECDH public key from `get_info`
//! 3. Client joins the channel (derives the shared key)
//! 4. Queries are encrypted with the shared key and signed by the account key
//! 5. Responses are decrypted with the same shared key

pub mod aes_gcm;
pub mod channel;
pub mod ecdh;
pub mod error;
pub mod signer;

pub use aes_gcm::{decrypt_aes_gcm, encrypt_aes_gcm, generate_iv};
pub use channel::{ChannelState, SecureChannel};
pub use ecdh::{derive_shared_key, import_public_key, parse_public_key_hex, EcdhKeyPair, SharedKey};
pub use error::CryptoError;
pub use signer::{verify_ed25519, Ed25519Signer, QuerySigner};
