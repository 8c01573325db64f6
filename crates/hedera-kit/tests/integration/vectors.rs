//! Fixed input vectors for the core acceptance and rejection rules.

use hedera_kit::prelude::*;
use hedera_kit::{AccountBalance, KeyType, TokenBalance};
use serde_json::json;

// =============================================================================
// Entity vectors
// =============================================================================

#[test]
fn test_wrong_key_is_missing_field() {
    let err = TokenBalance::from_value(&json!({ "tokenId": "abc" })).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::MissingField);
    assert_eq!(err.field(), "token_id");
}

#[test]
fn test_well_formed_id_accepted() {
    let b = TokenBalance::from_value(&json!({ "token_id": "0.0.1234", "balance": 1 })).unwrap();
    assert_eq!(b.token_id, TokenId::from_num(1234));
}

#[test]
fn test_balance_bounds() {
    let negative = json!({ "account": "0.0.1001", "balance": -5, "tokens": [] });
    let err = AccountBalance::from_value(&negative).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::OutOfRange);

    let zero = json!({ "account": "0.0.1001", "balance": 0, "tokens": [] });
    assert_eq!(AccountBalance::from_value(&zero).unwrap().balance, Hbar::ZERO);
}

#[test]
fn test_nested_token_path() {
    let err = AccountBalance::from_value(&json!({
        "account": "0.0.1001",
        "balance": 100,
        "tokens": [{ "token_id": "bad-format", "balance": 100 }]
    }))
    .unwrap_err();
    assert!(err.is_nested());
    assert_eq!(err.path(), "tokens[0].token_id");
    assert_eq!(
        err.to_string(),
        "Invalid nested entity at 'tokens[0]': Field 'token_id' has invalid format: \
         Entity ID 'bad-format' has invalid format (expected 'shard.realm.num')"
    );
}

// =============================================================================
// HIP-15 checksum vectors
// =============================================================================

#[test]
fn test_checksum_vectors() {
    let id = EntityId::from_num(123);
    assert_eq!(id.checksum(Network::Mainnet), "vfmkw");
    assert_eq!(id.checksum(Network::Testnet), "esxsf");
    assert_eq!(id.checksum(Network::Previewnet), "ogizo");
    assert_eq!(EntityId::from_num(1234).checksum(Network::Mainnet), "pikcw");
    assert_eq!(EntityId::from_num(1234).checksum(Network::Testnet), "yvvkf");
    assert_eq!(EntityId::from_num(3).checksum(Network::Mainnet), "tzfmz");
}

#[test]
fn test_checksum_mismatch_rejected_with_network() {
    let value = json!({ "token_id": "0.0.123-vfmkw", "balance": 1 });

    // No network: only the checksum's shape is checked
    assert!(TokenBalance::from_value(&value).is_ok());

    let testnet = ValidationContext::testnet().build();
    let err = TokenBalance::from_value_in(&value, &testnet).unwrap_err();
    assert_eq!(err.field(), "token_id");
    assert_eq!(err.kind(), ValidationErrorKind::InvalidFormat);

    let mainnet = ValidationContext::mainnet().build();
    assert!(TokenBalance::from_value_in(&value, &mainnet).is_ok());
}

// =============================================================================
// Key vectors
// =============================================================================

#[test]
fn test_key_vectors() {
    let ed: PublicKey = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        .parse()
        .unwrap();
    assert_eq!(ed.key_type(), KeyType::Ed25519);
    assert_eq!(ed.to_evm_address(), None);

    let ec: PublicKey = "0x0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        .parse()
        .unwrap();
    assert_eq!(
        ec.to_evm_address().as_deref(),
        Some("0x7e5f4552091a69125d5dfcb7b8c2659029395bdf")
    );

    let off_curve_ed = format!("02{}", "00".repeat(31));
    assert!(off_curve_ed.parse::<PublicKey>().is_err());

    let off_curve_ec = format!("02{}05", "00".repeat(31));
    assert!(off_curve_ec.parse::<PublicKey>().is_err());
}
