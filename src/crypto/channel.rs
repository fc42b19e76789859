// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Secure Channel
//!
//! Pairs a local ephemeral P-256 key pair with the pRuntime node's ECDH key.
//!
//! ```text
//! Created ──assign_remote──▶ PendingJoin ──complete_join──▶ Joined
//!    └──────────────────────join─────────────────────────────┘
//! ```
//!
//! `join` is valid from every state; joining again with a different key
//! renegotiates the session and replaces the shared key. Encryption and
//! decryption only read the channel, so a joined channel can be shared
//! behind an `Arc` by any number of concurrent queries.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use p256::PublicKey;
use rand::{CryptoRng, RngCore};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use super::aes_gcm::{decrypt_aes_gcm, encrypt_aes_gcm, generate_iv};
use super::ecdh::{parse_public_key_hex, EcdhKeyPair, SharedKey};
use super::CryptoError;
use crate::models::{from_wire, to_wire, AeadCipher};

/// Lifecycle of a [`SecureChannel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Local key pair only
    Created,
    /// Remote key stored, shared key not derived yet
    PendingJoin,
    /// Shared key present; ready for encryption
    Joined,
}

/// ECDH channel between this client and a pRuntime node
#[derive(Clone, Debug)]
pub struct SecureChannel {
    local: EcdhKeyPair,
    remote: Option<PublicKey>,
    shared: Option<SharedKey>,
    wants_join: bool,
}

impl SecureChannel {
    /// Generate a local key pair; the channel joins once a remote key is known
    pub fn create<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let local = EcdhKeyPair::generate(rng);
        debug!(local_pubkey = %local.public_key_hex(), "ECDH channel created");
        Self {
            local,
            remote: None,
            shared: None,
            wants_join: true,
        }
    }

    pub fn state(&self) -> ChannelState {
        match (&self.remote, &self.shared) {
            (Some(_), Some(_)) => ChannelState::Joined,
            (Some(_), None) => ChannelState::PendingJoin,
            _ => ChannelState::Created,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ChannelState::Joined
    }

    /// Whether the channel should join as soon as a remote key is available
    pub fn wants_join(&self) -> bool {
        self.wants_join
    }

    /// Opt in or out of automatic joining
    ///
    /// A channel opted out keeps its current keys; it only stops following
    /// the node's advertised key.
    pub fn set_wants_join(&mut self, wants_join: bool) {
        self.wants_join = wants_join;
    }

    pub fn local_key_pair(&self) -> &EcdhKeyPair {
        &self.local
    }

    pub fn local_public_key_hex(&self) -> String {
        self.local.public_key_hex()
    }

    pub fn remote_public_key(&self) -> Option<&PublicKey> {
        self.remote.as_ref()
    }

    /// Remote key as uncompressed hex, if one has been assigned
    pub fn remote_public_key_hex(&self) -> Option<String> {
        use p256::elliptic_curve::sec1::ToEncodedPoint;
        self.remote
            .as_ref()
            .map(|key| hex::encode(key.to_encoded_point(false).as_bytes()))
    }

    /// Shared key, present only once joined
    pub fn shared_key(&self) -> Option<&SharedKey> {
        self.shared.as_ref()
    }

    /// Store the remote key without deriving the shared key
    ///
    /// Any previously derived key is dropped. On `InvalidKey` the channel is
    /// left untouched.
    pub fn assign_remote(&mut self, remote_hex: &str) -> Result<(), CryptoError> {
        let remote = parse_public_key_hex(remote_hex)?;
        self.remote = Some(remote);
        self.shared = None;
        Ok(())
    }

    /// Derive the shared key from the stored remote key
    pub fn complete_join(&mut self) -> Result<(), CryptoError> {
        let remote = self.remote.as_ref().ok_or_else(|| CryptoError::not_ready("join"))?;
        self.shared = Some(self.local.derive_shared_key(remote));
        info!("🔐 ECDH channel joined");
        Ok(())
    }

    /// Import the remote key and derive the shared key in one step
    pub fn join(&mut self, remote_hex: &str) -> Result<(), CryptoError> {
        let remote = parse_public_key_hex(remote_hex)?;
        let shared = self.local.derive_shared_key(&remote);
        if self.shared.is_some() {
            info!("🔄 ECDH channel renegotiated with new remote key");
        } else {
            info!("🔐 ECDH channel joined");
        }
        self.remote = Some(remote);
        self.shared = Some(shared);
        Ok(())
    }

    fn key_for(&self, operation: &str) -> Result<&SharedKey, CryptoError> {
        self.shared
            .as_ref()
            .ok_or_else(|| CryptoError::not_ready(operation))
    }

    /// Encrypt raw bytes with a fresh IV
    pub fn encrypt_bytes<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        data: &[u8],
    ) -> Result<AeadCipher, CryptoError> {
        let key = self.key_for("encrypt")?;
        let iv = generate_iv(rng);
        let cipher = encrypt_aes_gcm(&iv, key.as_bytes(), data)?;
        debug!(
            plaintext_len = data.len(),
            cipher_len = cipher.len(),
            "Encrypted payload for remote"
        );

        Ok(AeadCipher {
            iv_b64: STANDARD.encode(iv),
            cipher_b64: STANDARD.encode(&cipher),
            pubkey_b64: STANDARD.encode(self.local.public_key_bytes()),
        })
    }

    /// Encrypt an untyped document, converting its keys to wire convention
    pub fn encrypt_value<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        value: JsonValue,
    ) -> Result<AeadCipher, CryptoError> {
        self.key_for("encrypt")?;
        let json = serde_json::to_string(&to_wire(value))
            .map_err(|e| CryptoError::invalid_payload("plaintext", e))?;
        self.encrypt_bytes(rng, json.as_bytes())
    }

    /// Serialize and encrypt `obj`
    pub fn encrypt_object<R: CryptoRng + RngCore, T: Serialize + ?Sized>(
        &self,
        rng: &mut R,
        obj: &T,
    ) -> Result<AeadCipher, CryptoError> {
        self.key_for("encrypt")?;
        let value =
            serde_json::to_value(obj).map_err(|e| CryptoError::invalid_payload("plaintext", e))?;
        self.encrypt_value(rng, value)
    }

    /// Decrypt a cipher produced by the remote side
    pub fn decrypt_bytes(&self, cipher: &AeadCipher) -> Result<Vec<u8>, CryptoError> {
        let key = self.key_for("decrypt")?;
        let iv = STANDARD
            .decode(&cipher.iv_b64)
            .map_err(|e| CryptoError::invalid_payload("iv_b64", e))?;
        let data = STANDARD
            .decode(&cipher.cipher_b64)
            .map_err(|e| CryptoError::invalid_payload("cipher_b64", e))?;
        decrypt_aes_gcm(&iv, key.as_bytes(), &data)
    }

    /// Decrypt into an untyped document with keys in application convention
    pub fn decrypt_value(&self, cipher: &AeadCipher) -> Result<JsonValue, CryptoError> {
        let data = self.decrypt_bytes(cipher)?;
        let json = std::str::from_utf8(&data)
            .map_err(|e| CryptoError::invalid_payload("plaintext", e))?;
        let value: JsonValue =
            serde_json::from_str(json).map_err(|e| CryptoError::invalid_payload("plaintext", e))?;
        Ok(from_wire(value))
    }

    /// Decrypt and deserialize into `T`
    pub fn decrypt_object<T: DeserializeOwned>(&self, cipher: &AeadCipher) -> Result<T, CryptoError> {
        let value = self.decrypt_value(cipher)?;
        serde_json::from_value(value).map_err(|e| CryptoError::invalid_payload("plaintext", e))
    }
}
