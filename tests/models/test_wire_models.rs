// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Typed models against their wire representation

use pruntime_client::models::{
    from_wire, to_wire, AssetsResponse, BalancesCommand, GetInfoResp, Origin, Payload,
    ReceiptResponse, SignedQuery, TestEcdhParam, TestReq,
};
use serde_json::json;

#[test]
fn test_get_info_from_wire() {
    let wire = json!({
        "initialized": true,
        "blocknum": 1234,
        "public_key": "02aa",
        "ecdh_public_key": "04bb"
    });
    let info: GetInfoResp = serde_json::from_value(from_wire(wire)).unwrap();
    assert!(info.initialized);
    assert_eq!(info.blocknum, 1234);
    assert_eq!(info.public_key, "02aa");
    assert_eq!(info.ecdh_public_key, "04bb");
}

#[test]
fn test_signed_query_to_wire() {
    let query = SignedQuery {
        query_payload: "{\"Cipher\":{}}".to_string(),
        origin: Some(Origin {
            origin: "d75a98".to_string(),
            sig_b64: "c2ln".to_string(),
            sig_type: "sr25519".to_string(),
        }),
    };
    let wire = to_wire(serde_json::to_value(&query).unwrap());
    assert_eq!(
        wire,
        json!({
            "query_payload": "{\"Cipher\":{}}",
            "origin": {"origin": "d75a98", "sig_b64": "c2ln", "sig_type": "sr25519"}
        })
    );
}

#[test]
fn test_plain_payload_from_wire() {
    let payload: Payload =
        serde_json::from_value(from_wire(json!({"Plain": "{\"x\":1}"}))).unwrap();
    assert_eq!(payload, Payload::Plain("{\"x\":1}".to_string()));
}

#[test]
fn test_receipt_response_sample() {
    let wire = json!({"QueryReceipt":{"receipt":{
        "account":"d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d",
        "block_num":53,
        "command":"{\"Transfer\":{\"dest\":\"dc5c0eea8f8602deb7e1844b87b7635d5e5dfd5737ab5ddbcf62db78a8f7a01d\",\"value\":\"10000000000000000\"}}",
        "contract_id":2,
        "status":"Ok",
        "tx_hash":"240c2e8b6e1536d484eaadef4c820c9991e0ac7e2d6b947ebed8b0bd4ad5b156"
    }}});

    let response: ReceiptResponse = serde_json::from_value(from_wire(wire)).unwrap();
    let ReceiptResponse::QueryReceipt { receipt } = response else {
        panic!("expected a receipt");
    };
    assert_eq!(receipt.block_num, 53);
    assert_eq!(receipt.contract_id, 2);
    assert_eq!(receipt.status, "Ok");

    // The stored command is the Transfer the client pushed
    let command: BalancesCommand = serde_json::from_str(&receipt.command).unwrap();
    assert_eq!(
        command,
        BalancesCommand::Transfer {
            dest: "dc5c0eea8f8602deb7e1844b87b7635d5e5dfd5737ab5ddbcf62db78a8f7a01d".to_string(),
            value: "10000000000000000".to_string(),
        }
    );
}

#[test]
fn test_assets_list_from_wire() {
    let wire = json!({"ListAssets": {"assets": [
        {"metadata": {"owner": "aa", "total_supply": "100", "symbol": "TTT", "id": 0}, "balance": "7"}
    ]}});
    let response: AssetsResponse = serde_json::from_value(from_wire(wire)).unwrap();
    match response {
        AssetsResponse::ListAssets { assets } => {
            assert_eq!(assets.len(), 1);
            assert_eq!(assets[0].metadata.total_supply, "100");
            assert_eq!(assets[0].balance, "7");
        }
        other => panic!("unexpected response {:?}", other),
    }
}

#[test]
fn test_contract_error_variant() {
    let response: AssetsResponse =
        serde_json::from_value(from_wire(json!({"Error": "NotFound"}))).unwrap();
    assert_eq!(response, AssetsResponse::Error("NotFound".to_string()));
}

#[test]
fn test_test_request_to_wire() {
    let request = TestReq {
        test_ecdh: Some(TestEcdhParam {
            pubkey_hex: "04aa".to_string(),
            message_b64: "aGk=".to_string(),
        }),
    };
    assert_eq!(
        to_wire(serde_json::to_value(&request).unwrap()),
        json!({"test_ecdh": {"pubkey_hex": "04aa", "message_b64": "aGk="}})
    );
    assert_eq!(
        serde_json::to_value(TestReq::default()).unwrap(),
        json!({})
    );
}
