// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! pRuntime node client
//!
//! - `query`: query envelope encoding, signing and response decoding
//! - `transport`: JSON-over-HTTP transport (trait + reqwest implementation)
//! - `client`: typed API (`get_info`, `query`, `test`)
//! - `monitor`: background poller keeping the secure channel joined

pub mod client;
pub mod error;
pub mod monitor;
pub mod query;
pub mod transport;

pub use client::{measure, PRuntimeClient, PATH_GET_INFO, PATH_QUERY, PATH_TEST};
pub use error::{PRuntimeError, PRuntimeResult};
pub use monitor::{smooth_latency, Clock, NodeMonitor, NodeStatus, NodeStatusHandle, TokioClock};
pub use query::{
    build_query, decode_payload_value, encode_payload, encrypt_command, random_nonce, receive,
    send, sign_query, NONCE_RANGE,
};
pub use transport::{HttpTransport, Transport};
