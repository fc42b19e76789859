// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire Model Transcoder
//!
//! The application uses camelCase field names; the pRuntime wire protocol uses
//! snake_case. Tagged-union discriminants (`Transfer`, `Metadata`, `Cipher`,
//! `Plain`, ...) are PascalCase on both sides and must pass through untouched,
//! otherwise the node no longer recognises the variant.
//!
//! The transcoder works on untyped `serde_json::Value`s. Typed models are
//! serialized/deserialized around it by the caller.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

fn variant_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("static regex"))
}

/// Returns true for keys that are tagged-union variant names
pub fn is_variant_tag(key: &str) -> bool {
    variant_tag_pattern().is_match(key)
}

/// `ecdhPublicKey` → `ecdh_public_key`, `ivB64` → `iv_b64`
///
/// Already snake_case input is returned unchanged.
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(c);
            prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

/// `ecdh_public_key` → `ecdhPublicKey`, `iv_b64` → `ivB64`
///
/// Leading underscores are kept; already camelCase input is unchanged.
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' && !out.is_empty() {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    out
}

fn transcode_keys(value: Value, rename: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                let key = if is_variant_tag(&key) { key } else { rename(&key) };
                out.insert(key, transcode_keys(inner, rename));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| transcode_keys(item, rename))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Convert application field names to the wire convention, recursively
pub fn to_wire(value: Value) -> Value {
    transcode_keys(value, &to_snake_case)
}

/// Convert wire field names to the application convention, recursively
pub fn from_wire(value: Value) -> Value {
    transcode_keys(value, &to_camel_case)
}
