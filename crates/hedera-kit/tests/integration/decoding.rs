//! Decoding through the logged entry points and the schema table.

use hedera_kit::prelude::*;
use hedera_kit::{DidDocument, StateProof, TopicMessage, decode, schema};
use serde_json::json;

use crate::init_tracing;

const DID: &str = "did:hedera:testnet:FVen3X669xLzsi6N2V91DoiyzHzg1uAgqiT8jZ9nS96Z_0.0.7000";

#[test]
fn test_decode_did_document() {
    init_tracing();
    let json = json!({
        "@context": "https://www.w3.org/ns/did/v1",
        "id": DID,
        "verificationMethod": [{
            "id": format!("{DID}#did-root-key"),
            "type": "Ed25519VerificationKey2020",
            "controller": DID,
            "publicKeyMultibase": "z6MktwupdmLXVVqTzCw4i46r4uGyosGXRnR3XjN4Zq7oMMsw"
        }],
        "assertionMethod": [format!("{DID}#did-root-key")]
    })
    .to_string();

    let doc: DidDocument = decode::decode(&json).unwrap();
    assert_eq!(doc.id.topic_id(), TopicId::from_num(7000));
    assert_eq!(doc.verification_method.len(), 1);
}

#[test]
fn test_decode_topic_message_under_context() {
    init_tracing();
    let ctx = ValidationContext::testnet().build();
    let json = json!({
        "topic_id": "0.0.123-esxsf",
        "consensus_timestamp": "1700000000.000000001",
        "sequence_number": 4,
        "message": "aGVsbG8=",
        "running_hash": "cd".repeat(48),
        "running_hash_version": 3,
        "payer_account_id": "0.0.123"
    })
    .to_string();

    let msg: TopicMessage = decode::decode_in(&json, &ctx).unwrap();
    assert_eq!(msg.message, b"hello");
    assert_eq!(msg.chunk_info, None);
}

#[test]
fn test_schema_validate_state_proof() {
    init_tracing();
    let ctx = ValidationContext::default();
    let proof = json!({
        "version": 5,
        "record_file": { "contents": "aGVsbG8=" },
        "signature_files": [{ "node_account_id": "0.0.3", "contents": "c2lnMw==" }],
        "address_books": ["Ym9vaw=="]
    });

    schema::validate("StateProof", &proof, &ctx).unwrap();
    schema::validate("_Entity.StateProof", &proof, &ctx).unwrap();

    let decoded: StateProof = decode::decode_value_in(&proof, &ctx).unwrap();
    assert_eq!(decoded.version, 5);
}

#[test]
fn test_schema_rejection_reports_path() {
    init_tracing();
    let ctx = ValidationContext::default();
    let bad = json!({
        "account": "0.0.1001",
        "balance": 100,
        "tokens": [{ "token_id": "0.0.1", "balance": 1 }, { "token_id": "0.0.2" }]
    });
    let err = schema::validate("Hashgraph.Ledger.AccountBalance", &bad, &ctx).unwrap_err();
    let validation = err.as_validation().unwrap();
    assert_eq!(validation.path(), "tokens[1].balance");
    assert_eq!(validation.kind(), ValidationErrorKind::MissingField);
}

#[test]
fn test_every_schema_rejects_non_objects() {
    let ctx = ValidationContext::default();
    for entry in schema::entries() {
        let err = entry.check(&json!("not an object"), &ctx).unwrap_err();
        assert_eq!(err.field(), "$", "schema {}", entry.name);
    }
}

#[test]
fn test_serde_deserialize_routes_through_validation() {
    #[derive(Debug, serde::Deserialize)]
    struct Envelope {
        proof: StateProof,
    }

    let bad = json!({
        "proof": {
            "version": 4,
            "record_file": { "contents": "aGVsbG8=" },
            "signature_files": [{ "node_account_id": "0.0.3", "contents": "c2lnMw==" }],
            "address_books": ["Ym9vaw=="]
        }
    });
    let err = serde_json::from_value::<Envelope>(bad.clone()).unwrap_err();
    assert!(err.to_string().contains("version"));

    let mut good = bad;
    good["proof"]["version"] = json!(6);
    let envelope: Envelope = serde_json::from_value(good).unwrap();
    assert_eq!(envelope.proof.version, 6);
}
