// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query envelope construction and decoding

use pruntime_client::crypto::{verify_ed25519, Ed25519Signer, QuerySigner, SecureChannel};
use pruntime_client::models::{from_wire, to_wire, BalancesRequest, Payload, BALANCES_CONTRACT_ID};
use pruntime_client::pruntime::{
    build_query, decode_payload_value, encode_payload, receive, send, PRuntimeError, NONCE_RANGE,
};
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;
use serde_json::{json, Value as JsonValue};

fn client_and_node() -> (SecureChannel, SecureChannel) {
    let mut client = SecureChannel::create(&mut OsRng);
    let mut node = SecureChannel::create(&mut OsRng);
    client.join(&node.local_public_key_hex()).unwrap();
    node.join(&client.local_public_key_hex()).unwrap();
    (client, node)
}

#[test]
fn test_signed_envelope_origin() {
    let (client, _) = client_and_node();
    let signer = Ed25519Signer::generate(&mut OsRng);
    let query = build_query(&mut OsRng, BALANCES_CONTRACT_ID, BalancesRequest::TotalIssuance);

    let signed = send(&mut OsRng, &client, &query, Some(&signer)).unwrap();
    let origin = signed.origin.expect("signed query carries an origin");

    assert_eq!(origin.origin, hex::encode(signer.public_key()));
    assert_eq!(origin.sig_type, "ed25519");
    verify_ed25519(&origin.origin, signed.query_payload.as_bytes(), &origin.sig_b64)
        .expect("signature covers the payload bytes");
}

#[test]
fn test_unsigned_envelope_has_no_origin_key() {
    let (client, _) = client_and_node();
    let query = build_query(&mut OsRng, BALANCES_CONTRACT_ID, BalancesRequest::TotalIssuance);

    let signed = send(&mut OsRng, &client, &query, None).unwrap();
    assert!(signed.origin.is_none());

    let wire = to_wire(serde_json::to_value(&signed).unwrap());
    let fields = wire.as_object().unwrap();
    assert_eq!(fields.len(), 1);
    assert!(fields.contains_key("query_payload"));
}

#[test]
fn test_payload_is_wire_cipher_envelope() {
    let (client, node) = client_and_node();
    let query = build_query(&mut OsRng, 2, BalancesRequest::TotalIssuance);
    let signed = send(&mut OsRng, &client, &query, None).unwrap();

    let envelope: JsonValue = serde_json::from_str(&signed.query_payload).unwrap();
    let cipher = &envelope["Cipher"];
    for field in ["iv_b64", "cipher_b64", "pubkey_b64"] {
        assert!(cipher[field].is_string(), "missing {}", field);
    }

    // The node reads the query in wire convention
    let payload: Payload = serde_json::from_value(from_wire(envelope)).unwrap();
    let Payload::Cipher(cipher) = payload else {
        panic!("expected a cipher payload");
    };
    let plaintext: JsonValue =
        serde_json::from_slice(&node.decrypt_bytes(&cipher).unwrap()).unwrap();
    assert_eq!(
        plaintext,
        json!({"contract_id": 2, "nonce": query.nonce, "request": "TotalIssuance"})
    );
}

#[test]
fn test_query_nonce_range() {
    for _ in 0..500 {
        let query = build_query(&mut OsRng, 2, ());
        assert!(query.nonce < NONCE_RANGE);
    }
}

#[test]
fn test_injected_rng_makes_encoding_reproducible() {
    let (client, _) = client_and_node();
    let request = BalancesRequest::FreeBalance {
        account: "d43593c7".to_string(),
    };

    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);
    let query_a = build_query(&mut rng_a, 2, request.clone());
    let query_b = build_query(&mut rng_b, 2, request);
    assert_eq!(query_a, query_b);

    let payload_a = encode_payload(&mut rng_a, &client, &query_a).unwrap();
    let payload_b = encode_payload(&mut rng_b, &client, &query_b).unwrap();
    assert_eq!(payload_a, payload_b);
}

#[test]
fn test_receive_cipher_response() {
    let (client, node) = client_and_node();
    let response = json!({"FreeBalance": {"balance": "42"}});
    let cipher = node.encrypt_value(&mut OsRng, response.clone()).unwrap();

    let decoded: JsonValue = receive(&client, Payload::Cipher(cipher)).unwrap();
    assert_eq!(decoded, response);
}

#[test]
fn test_decode_payload_value_both_variants() {
    let (client, node) = client_and_node();

    let plain = json!({"Plain": "{\"total_issuance\":\"9\"}"});
    assert_eq!(
        decode_payload_value(&client, plain).unwrap(),
        json!({"totalIssuance": "9"})
    );

    let cipher = node.encrypt_value(&mut OsRng, json!({"x": 1})).unwrap();
    let envelope = serde_json::to_value(Payload::Cipher(cipher)).unwrap();
    assert_eq!(decode_payload_value(&client, envelope).unwrap(), json!({"x": 1}));

    assert!(matches!(
        decode_payload_value(&client, json!({"Unknown": {}})),
        Err(PRuntimeError::Decode(_))
    ));
}

#[test]
fn test_plain_payload_with_bad_json() {
    let (client, _) = client_and_node();
    let result: Result<JsonValue, _> = receive(&client, Payload::Plain("{oops".to_string()));
    assert!(matches!(result, Err(PRuntimeError::Decode(_))));
}

#[test]
fn test_unready_channel_rejects_send() {
    let channel = SecureChannel::create(&mut OsRng);
    let query = build_query(&mut OsRng, 2, BalancesRequest::TotalIssuance);
    let err = send(&mut OsRng, &channel, &query, None).unwrap_err();
    assert!(err.is_not_ready());
}
