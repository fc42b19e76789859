// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Node monitor
//!
//! Background task that polls `get_info` at a fixed interval, tracks the
//! node's latency and keeps the [`SecureChannel`] joined with the node's
//! current ECDH key.
//!
//! The monitor is the only writer of the channel. Every change is published
//! through a `tokio::sync::watch` channel as a [`NodeStatus`] snapshot; any
//! number of [`NodeStatusHandle`]s read it and issue queries over the shared
//! `Arc<SecureChannel>`.
//!
//! A failed poll is logged and recorded, and the loop tries again on the next
//! tick. This is the only retry point of the client.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::client::PRuntimeClient;
use super::error::PRuntimeError;
use crate::crypto::{parse_public_key_hex, CryptoError, SecureChannel};
use crate::models::GetInfoResp;

/// Weight of the previous latency estimate
const LATENCY_DECAY: f64 = 0.8;

/// Time source of the poll loop
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Snapshot published after every poll
#[derive(Clone, Debug)]
pub struct NodeStatus {
    /// Last successful `get_info` response
    pub info: Option<GetInfoResp>,
    /// Smoothed round-trip time of `get_info`
    pub latency_ms: Option<f64>,
    /// Whether the last `get_info` succeeded
    pub connected: bool,
    /// Error of the last poll step, cleared on success
    pub last_error: Option<PRuntimeError>,
    /// Current channel; joined once the node key is known
    pub channel: Arc<SecureChannel>,
    /// Number of completed poll steps
    pub polls: u64,
}

impl NodeStatus {
    fn initial(channel: Arc<SecureChannel>) -> Self {
        Self {
            info: None,
            latency_ms: None,
            connected: false,
            last_error: None,
            channel,
            polls: 0,
        }
    }
}

/// Exponentially weighted moving average; the first sample is taken as-is
pub fn smooth_latency(previous: Option<f64>, sample_ms: f64) -> f64 {
    match previous {
        Some(prev) => LATENCY_DECAY * prev + (1.0 - LATENCY_DECAY) * sample_ms,
        None => sample_ms,
    }
}

pub struct NodeMonitor {
    client: PRuntimeClient,
    channel: SecureChannel,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    status_tx: watch::Sender<NodeStatus>,
}

impl NodeMonitor {
    pub fn new(client: PRuntimeClient, channel: SecureChannel, poll_interval: Duration) -> Self {
        let (status_tx, _) = watch::channel(NodeStatus::initial(Arc::new(channel.clone())));
        Self {
            client,
            channel,
            clock: Arc::new(TokioClock),
            poll_interval,
            status_tx,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// New reader of the published status
    pub fn handle(&self) -> NodeStatusHandle {
        NodeStatusHandle {
            rx: self.status_tx.subscribe(),
        }
    }

    /// One poll step: `get_info`, latency update, join if the node key changed
    ///
    /// The outcome is also recorded in the published status.
    pub async fn poll_once(&mut self) -> Result<(), PRuntimeError> {
        let result = self.poll_step().await;
        match &result {
            Ok(()) => self.status_tx.send_modify(|status| {
                status.last_error = None;
                status.polls += 1;
            }),
            Err(e) => {
                warn!("⚠️ pRuntime poll failed: {}", e);
                let err = e.clone();
                self.status_tx.send_modify(|status| {
                    status.last_error = Some(err);
                    status.polls += 1;
                });
            }
        }
        result
    }

    async fn poll_step(&mut self) -> Result<(), PRuntimeError> {
        let begin = self.clock.now();
        let info = match self.client.get_info().await {
            Ok(info) => info,
            Err(e) => {
                self.status_tx.send_modify(|status| status.connected = false);
                return Err(e);
            }
        };
        let sample_ms = self.clock.now().saturating_duration_since(begin).as_secs_f64() * 1000.0;

        debug!(
            blocknum = info.blocknum,
            initialized = info.initialized,
            latency_ms = sample_ms,
            "get_info"
        );

        let joined = self.maybe_join(&info);
        let channel = joined.as_ref().ok().cloned().flatten();
        self.status_tx.send_modify(|status| {
            status.latency_ms = Some(smooth_latency(status.latency_ms, sample_ms));
            status.connected = true;
            status.info = Some(info);
            if let Some(channel) = channel {
                status.channel = channel;
            }
        });
        joined.map(|_| ())
    }

    /// Join when the node advertises a key the channel does not hold yet
    ///
    /// Returns the new channel snapshot when a join happened.
    fn maybe_join(&mut self, info: &GetInfoResp) -> Result<Option<Arc<SecureChannel>>, PRuntimeError> {
        let node_key = info.ecdh_public_key.trim();
        if node_key.is_empty() || !self.channel.wants_join() {
            return Ok(None);
        }

        let parsed = parse_public_key_hex(node_key)?;
        if self.channel.remote_public_key() == Some(&parsed) && self.channel.is_ready() {
            return Ok(None);
        }

        self.channel.join(node_key)?;
        Ok(Some(Arc::new(self.channel.clone())))
    }

    /// Poll until `shutdown` is cancelled
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!("📡 Node monitor started (interval {:?})", self.poll_interval);
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = self.poll_once() => {}
            }
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = self.clock.sleep(self.poll_interval) => {}
            }
        }
        info!("Node monitor stopped");
    }

    /// Run on the tokio runtime, returning a handle to the status
    pub fn spawn(self, shutdown: CancellationToken) -> (NodeStatusHandle, JoinHandle<()>) {
        let handle = self.handle();
        let task = tokio::spawn(self.run(shutdown));
        (handle, task)
    }
}

/// Read side of the monitor
#[derive(Clone)]
pub struct NodeStatusHandle {
    rx: watch::Receiver<NodeStatus>,
}

impl NodeStatusHandle {
    pub fn status(&self) -> NodeStatus {
        self.rx.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.rx.borrow().connected
    }

    pub fn is_ready(&self) -> bool {
        self.rx.borrow().channel.is_ready()
    }

    pub fn info(&self) -> Option<GetInfoResp> {
        self.rx.borrow().info.clone()
    }

    pub fn latency_ms(&self) -> Option<f64> {
        self.rx.borrow().latency_ms
    }

    pub fn last_error(&self) -> Option<PRuntimeError> {
        self.rx.borrow().last_error.clone()
    }

    /// The joined channel, or `ChannelNotReady` while still waiting for the node
    pub fn channel(&self) -> Result<Arc<SecureChannel>, PRuntimeError> {
        let channel = self.rx.borrow().channel.clone();
        if channel.is_ready() {
            Ok(channel)
        } else {
            Err(CryptoError::not_ready("query").into())
        }
    }

    /// Wait for the next published status; false once the monitor is gone
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until the channel is joined
    pub async fn wait_ready(&mut self) -> Result<Arc<SecureChannel>, PRuntimeError> {
        loop {
            if let Ok(channel) = self.channel() {
                return Ok(channel);
            }
            if !self.changed().await {
                return self.channel();
            }
        }
    }
}
