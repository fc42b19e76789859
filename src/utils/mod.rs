// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod address;

pub use address::{ss58_to_hex, strip_hex_prefix, u8a_to_hex_compact, AddressError};
