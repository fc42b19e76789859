// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP transport to a pRuntime node
//!
//! Every endpoint is a JSON POST of a [`RequestEnvelope`] answered by an
//! [`ApiResponse`]. The trait is the seam tests use to plug in a fake node.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::PRuntimeError;
use crate::models::{ApiResponse, RequestEnvelope};

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `path` relative to the node endpoint
    async fn post(&self, path: &str, body: RequestEnvelope) -> Result<ApiResponse, PRuntimeError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// `endpoint` should end with `/` so that paths are joined below it
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, PRuntimeError> {
        if endpoint.cannot_be_a_base() {
            return Err(PRuntimeError::InvalidEndpoint(endpoint.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: RequestEnvelope) -> Result<ApiResponse, PRuntimeError> {
        let url = self.endpoint.join(path)?;
        debug!("POST {} (nonce {})", url, body.nonce.id);

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<ApiResponse>().await?)
    }
}
