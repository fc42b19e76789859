// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! Error type shared by the AEAD cipher, ECDH key agreement, query signer and
//! secure channel.
//!
//! ## Error Variants
//!
//! - **InvalidKey**: malformed public key, wrong key length, bad seed
//! - **ChannelNotReady**: encrypt/decrypt attempted before the channel joined
//! - **AuthenticationFailed**: AES-GCM tag verification failed
//! - **InvalidNonce**: IV has the wrong length (AES-GCM requires 12 bytes)
//! - **InvalidPayload**: base64/UTF-8/JSON decoding of a cipher field failed
//! - **SignerLocked**: the signing account is locked
//! - **SigningFailed**: the signer refused or failed to produce a signature
//!
//! `ChannelNotReady` is a contract violation on the caller's side, and
//! `AuthenticationFailed` must never be retried with the same key and IV.

use std::fmt;

/// Error type for all cryptographic operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid cryptographic key
    ///
    /// Raised when a public key is not a valid P-256 point, a symmetric key
    /// is not 32 bytes, or a signer seed cannot be parsed.
    InvalidKey {
        /// Type of key that failed (e.g., "remote_ecdh_public_key")
        key_type: String,
        /// Specific failure reason
        reason: String,
    },

    /// The channel has no shared key yet
    ChannelNotReady {
        /// Which operation was attempted
        operation: String,
    },

    /// AEAD authentication failed
    ///
    /// The ciphertext was tampered with, the key is wrong, or the IV does
    /// not match the one used for encryption.
    AuthenticationFailed {
        /// Which operation was being performed
        operation: String,
        /// Specific failure reason
        reason: String,
    },

    /// Invalid IV size
    InvalidNonce {
        /// Expected IV size (always 12 for AES-GCM)
        expected_size: usize,
        /// Actual IV size provided
        actual_size: usize,
    },

    /// A cipher field or decrypted document could not be decoded
    InvalidPayload {
        /// Which field failed validation
        field: String,
        /// Specific failure reason
        reason: String,
    },

    /// The signing account is locked
    SignerLocked,

    /// The signer failed to produce a signature
    SigningFailed {
        /// Specific failure reason
        reason: String,
    },
}

impl CryptoError {
    pub(crate) fn not_ready(operation: &str) -> Self {
        CryptoError::ChannelNotReady {
            operation: operation.to_string(),
        }
    }

    pub(crate) fn invalid_payload(field: &str, reason: impl fmt::Display) -> Self {
        CryptoError::InvalidPayload {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::InvalidKey { key_type, reason } => {
                write!(f, "Invalid key ({}): {}", key_type, reason)
            }
            CryptoError::ChannelNotReady { operation } => {
                write!(f, "ECDH channel not ready for {}: remote not joined", operation)
            }
            CryptoError::AuthenticationFailed { operation, reason } => {
                write!(f, "Authentication failed during {}: {}", operation, reason)
            }
            CryptoError::InvalidNonce {
                expected_size,
                actual_size,
            } => {
                write!(
                    f,
                    "Invalid nonce size: expected {} bytes, got {} bytes",
                    expected_size, actual_size
                )
            }
            CryptoError::InvalidPayload { field, reason } => {
                write!(f, "Invalid payload field '{}': {}", field, reason)
            }
            CryptoError::SignerLocked => write!(f, "Signing account is locked"),
            CryptoError::SigningFailed { reason } => write!(f, "Signing failed: {}", reason),
        }
    }
}

impl std::error::Error for CryptoError {}

// Conversion from hex decode errors
impl From<hex::FromHexError> for CryptoError {
    fn from(err: hex::FromHexError) -> Self {
        CryptoError::InvalidPayload {
            field: "hex_field".to_string(),
            reason: format!("hex decode error: {}", err),
        }
    }
}

// Conversion from base64 decode errors
impl From<base64::DecodeError> for CryptoError {
    fn from(err: base64::DecodeError) -> Self {
        CryptoError::InvalidPayload {
            field: "base64_field".to_string(),
            reason: format!("base64 decode error: {}", err),
        }
    }
}

// Conversion from p256 errors (elliptic curve operations)
impl From<p256::elliptic_curve::Error> for CryptoError {
    fn from(err: p256::elliptic_curve::Error) -> Self {
        CryptoError::InvalidKey {
            key_type: "p256".to_string(),
            reason: format!("p256 error: {}", err),
        }
    }
}

// Conversion from aes-gcm errors (opaque by design of the aead crate)
impl From<aes_gcm::aead::Error> for CryptoError {
    fn from(err: aes_gcm::aead::Error) -> Self {
        CryptoError::AuthenticationFailed {
            operation: "AEAD".to_string(),
            reason: format!("aes-gcm error: {}", err),
        }
    }
}
