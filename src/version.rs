// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the pRuntime client

/// Full version string with feature description
pub const VERSION: &str = "v0.3.0-secure-channel-2025-10-13";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.3.0";

/// Major version number
pub const VERSION_MAJOR: u32 = 0;

/// Minor version number
pub const VERSION_MINOR: u32 = 3;

/// Patch version number
pub const VERSION_PATCH: u32 = 0;

/// Build date
pub const BUILD_DATE: &str = "2025-10-13";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "ecdh-p256",
    "aes-256-gcm",
    "secure-channel",
    "channel-renegotiation",
    "signed-queries",
    "encrypted-commands",
    "node-monitor",
    "wire-transcoding",
];

/// Contract ids with typed models
pub const KNOWN_CONTRACTS: &[u32] = &[
    crate::models::BALANCES_CONTRACT_ID,
    crate::models::ASSETS_CONTRACT_ID,
];

/// Breaking changes from previous version
pub const BREAKING_CHANGES: &[&str] = &[
    "Query responses with status 'err' now fail with PRuntimeError::Node instead of being decoded",
    "Channel access goes through NodeStatusHandle::channel(); queries before join fail with ChannelNotReady",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("pRuntime Client {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info as JSON
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
        "contracts": KNOWN_CONTRACTS,
        "breaking_changes": BREAKING_CHANGES,
    })
}
