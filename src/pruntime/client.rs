// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! pRuntime API client
//!
//! Thin typed layer over a [`Transport`]: parameters are converted to the
//! wire convention, wrapped in `{input, nonce}` and posted; the returned
//! payload is parsed, converted back and deserialized.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::error::PRuntimeError;
use super::query::{build_query, random_nonce, receive, send};
use super::transport::{HttpTransport, Transport};
use crate::config::PRuntimeConfig;
use crate::crypto::{QuerySigner, SecureChannel};
use crate::models::{
    from_wire, to_wire, GetInfoResp, Payload, RequestEnvelope, RequestNonce, SignedQuery, TestReq,
};

pub const PATH_GET_INFO: &str = "get_info";
pub const PATH_QUERY: &str = "query";
pub const PATH_TEST: &str = "test";

/// Client for a single pRuntime node
#[derive(Clone)]
pub struct PRuntimeClient {
    transport: Arc<dyn Transport>,
}

impl PRuntimeClient {
    /// HTTP client for the configured endpoint
    pub fn new(config: &PRuntimeConfig) -> Result<Self, PRuntimeError> {
        let transport = HttpTransport::new(config.endpoint.clone(), config.timeout)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Post untyped params and return the untyped payload, both in
    /// application convention
    pub async fn req(&self, path: &str, params: JsonValue) -> Result<JsonValue, PRuntimeError> {
        self.req_with_rng(&mut OsRng, path, params).await
    }

    /// [`req`](Self::req) drawing the request nonce from `rng`
    pub async fn req_with_rng<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        path: &str,
        params: JsonValue,
    ) -> Result<JsonValue, PRuntimeError> {
        let id = random_nonce(rng);
        self.req_with_nonce(path, params, id).await
    }

    async fn req_with_nonce(&self, path: &str, params: JsonValue, id: u32) -> Result<JsonValue, PRuntimeError> {
        let body = RequestEnvelope {
            input: to_wire(params),
            nonce: RequestNonce { id },
        };

        let response = self.transport.post(path, body).await?;
        if !response.is_ok() {
            warn!("pRuntime {} returned status '{}'", path, response.status);
            return Err(PRuntimeError::Node {
                payload: response.payload,
            });
        }

        let payload: JsonValue = serde_json::from_str(&response.payload)?;
        Ok(from_wire(payload))
    }

    /// Post typed params and deserialize the typed response
    pub async fn req_typed<P, T>(&self, path: &str, params: &P) -> Result<T, PRuntimeError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.req_typed_with_rng(&mut OsRng, path, params).await
    }

    pub async fn req_typed_with_rng<R, P, T>(
        &self,
        rng: &mut R,
        path: &str,
        params: &P,
    ) -> Result<T, PRuntimeError>
    where
        R: CryptoRng + RngCore,
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let params = serde_json::to_value(params)?;
        let payload = self.req_with_rng(rng, path, params).await?;
        Ok(serde_json::from_value(payload)?)
    }

    pub async fn get_info(&self) -> Result<GetInfoResp, PRuntimeError> {
        self.get_info_with_rng(&mut OsRng).await
    }

    pub async fn get_info_with_rng<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<GetInfoResp, PRuntimeError> {
        self.req_typed_with_rng(rng, PATH_GET_INFO, &serde_json::json!({})).await
    }

    /// Diagnostic endpoint; the response shape is node-defined
    pub async fn test(&self, params: &TestReq) -> Result<JsonValue, PRuntimeError> {
        self.test_with_rng(&mut OsRng, params).await
    }

    pub async fn test_with_rng<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        params: &TestReq,
    ) -> Result<JsonValue, PRuntimeError> {
        self.req_typed_with_rng(rng, PATH_TEST, params).await
    }

    /// Issue an encrypted contract query using the OS RNG
    pub async fn query<Req, Resp>(
        &self,
        contract_id: u32,
        request: Req,
        channel: &SecureChannel,
        signer: Option<&dyn QuerySigner>,
    ) -> Result<Resp, PRuntimeError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let (signed, id) = prepare_query(&mut OsRng, contract_id, request, channel, signer)?;
        self.post_query(signed, id, channel).await
    }

    /// Issue an encrypted contract query drawing nonces and IVs from `rng`
    pub async fn query_with_rng<R, Req, Resp>(
        &self,
        rng: &mut R,
        contract_id: u32,
        request: Req,
        channel: &SecureChannel,
        signer: Option<&dyn QuerySigner>,
    ) -> Result<Resp, PRuntimeError>
    where
        R: CryptoRng + RngCore,
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let (signed, id) = prepare_query(rng, contract_id, request, channel, signer)?;
        self.post_query(signed, id, channel).await
    }

    async fn post_query<Resp: DeserializeOwned>(
        &self,
        signed: SignedQuery,
        id: u32,
        channel: &SecureChannel,
    ) -> Result<Resp, PRuntimeError> {
        let params = serde_json::to_value(&signed)?;
        let payload = self.req_with_nonce(PATH_QUERY, params, id).await?;
        let payload: Payload = serde_json::from_value(payload)
            .map_err(|e| PRuntimeError::Decode(format!("unexpected payload envelope: {}", e)))?;
        receive(channel, payload)
    }
}

fn prepare_query<R, Req>(
    rng: &mut R,
    contract_id: u32,
    request: Req,
    channel: &SecureChannel,
    signer: Option<&dyn QuerySigner>,
) -> Result<(SignedQuery, u32), PRuntimeError>
where
    R: CryptoRng + RngCore,
    Req: Serialize,
{
    let query = build_query(rng, contract_id, request);
    let signed = send(rng, channel, &query, signer)?;
    Ok((signed, random_nonce(rng)))
}

/// Run `fut` and report how long it took
pub async fn measure<F: Future>(fut: F) -> (F::Output, Duration) {
    let begin = Instant::now();
    let output = fut.await;
    let elapsed = begin.elapsed();
    debug!("Measured {:?}", elapsed);
    (output, elapsed)
}
