// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod crypto;
pub mod models;
pub mod pruntime;
pub mod utils;
pub mod version;

// Re-export main types
pub use config::PRuntimeConfig;
pub use crypto::{ChannelState, CryptoError, Ed25519Signer, QuerySigner, SecureChannel};
pub use pruntime::{
    NodeMonitor, NodeStatus, NodeStatusHandle, PRuntimeClient, PRuntimeError, Transport,
};
