// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client configuration
//!
//! Read from the environment with hard-coded fallbacks:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PRUNTIME_ENDPOINT` | `https://hashbox.corp.phala.network/tee-api/` |
//! | `PRUNTIME_TIMEOUT_SECS` | `10` |
//! | `PRUNTIME_POLL_INTERVAL_MS` | `1000` |

use std::time::Duration;
use url::Url;

use crate::pruntime::PRuntimeError;

pub const DEFAULT_ENDPOINT: &str = "https://hashbox.corp.phala.network/tee-api/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PRuntimeConfig {
    /// Base URL of the node API; always ends with `/`
    pub endpoint: Url,
    /// Per-request HTTP timeout
    pub timeout: Duration,
    /// Delay between status polls
    pub poll_interval: Duration,
}

impl Default for PRuntimeConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl PRuntimeConfig {
    /// Load from `PRUNTIME_*` environment variables
    ///
    /// Unset or unparsable numeric values fall back to the defaults; an
    /// unparsable endpoint is an error.
    pub fn from_env() -> Result<Self, PRuntimeError> {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("PRUNTIME_ENDPOINT") {
            config = config.with_endpoint(&endpoint)?;
        }
        if let Some(secs) = env_u64("PRUNTIME_TIMEOUT_SECS") {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(ms) = env_u64("PRUNTIME_POLL_INTERVAL_MS") {
            config = config.with_poll_interval(Duration::from_millis(ms));
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, PRuntimeError> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Parse an endpoint, appending the trailing `/` needed for path joining
pub fn parse_endpoint(endpoint: &str) -> Result<Url, PRuntimeError> {
    let endpoint = endpoint.trim();
    let normalized = if endpoint.ends_with('/') {
        endpoint.to_string()
    } else {
        format!("{}/", endpoint)
    };
    let url = Url::parse(&normalized)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PRuntimeError::InvalidEndpoint(format!(
            "unsupported scheme '{}'",
            other
        ))),
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
