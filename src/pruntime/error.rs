// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Errors surfaced by the pRuntime client
//!
//! - `Crypto`: channel/AEAD/signing failures (`ChannelNotReady`,
//!   `AuthenticationFailed`, `InvalidKey`, ...)
//! - `Decode`: response envelope or JSON could not be decoded
//! - `Transport`: network/HTTP failure, passed through unchanged
//! - `Node`: the node answered with `status: "err"`

use thiserror::Error;

use crate::crypto::CryptoError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PRuntimeError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("pRuntime returned an error: {payload}")]
    Node { payload: String },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl PRuntimeError {
    /// True when the query could not be issued because the channel is not
    /// joined yet. UIs gate query issuance on this instead of failing hard.
    pub fn is_not_ready(&self) -> bool {
        matches!(
            self,
            PRuntimeError::Crypto(CryptoError::ChannelNotReady { .. })
        )
    }

    /// True for AEAD tag failures; these must not be retried
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            PRuntimeError::Crypto(CryptoError::AuthenticationFailed { .. })
        )
    }
}

impl From<serde_json::Error> for PRuntimeError {
    fn from(err: serde_json::Error) -> Self {
        PRuntimeError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for PRuntimeError {
    fn from(err: reqwest::Error) -> Self {
        PRuntimeError::Transport(err.to_string())
    }
}

impl From<url::ParseError> for PRuntimeError {
    fn from(err: url::ParseError) -> Self {
        PRuntimeError::InvalidEndpoint(err.to_string())
    }
}

/// Result alias for client operations
pub type PRuntimeResult<T> = Result<T, PRuntimeError>;
