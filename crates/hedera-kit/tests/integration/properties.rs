//! Property tests for the validated value object contract.

use hedera_kit::prelude::*;
use hedera_kit::{AccountBalance, TokenBalance, TokenInfo};
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_entity_id() -> impl Strategy<Value = EntityId> {
    (0u64..4, 0u64..4, any::<u64>()).prop_map(|(shard, realm, num)| EntityId::new(shard, realm, num))
}

fn arb_token_balance() -> impl Strategy<Value = Value> {
    (arb_entity_id(), any::<u64>(), prop::option::of(0u32..=18)).prop_map(|(id, balance, decimals)| {
        let mut value = json!({ "token_id": id.to_string(), "balance": balance });
        if let Some(d) = decimals {
            value["decimals"] = json!(d);
        }
        value
    })
}

fn arb_account_balance() -> impl Strategy<Value = Value> {
    (
        arb_entity_id(),
        0i64..=i64::MAX,
        prop::collection::vec(arb_token_balance(), 0..5),
    )
        .prop_map(|(account, balance, tokens)| {
            json!({ "account": account.to_string(), "balance": balance, "tokens": tokens })
        })
}

fn arb_token_info() -> impl Strategy<Value = Value> {
    (
        arb_entity_id(),
        "[A-Za-z ]{1,40}",
        "[A-Z]{1,8}",
        0u32..=18,
        any::<u64>(),
        any::<bool>(),
    )
        .prop_map(|(id, name, symbol, decimals, supply, deleted)| {
            json!({
                "token_id": id.to_string(),
                "name": name,
                "symbol": symbol,
                "decimals": decimals,
                "total_supply": supply.to_string(),
                "treasury_account_id": "0.0.2",
                "type": "FUNGIBLE_COMMON",
                "supply_type": "INFINITE",
                "max_supply": "0",
                "deleted": deleted
            })
        })
}

/// Strings that are not `shard.realm.num` with an optional `-checksum` suffix.
fn arb_malformed_id() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,10}",
        "[0-9]{1,5}",
        "[0-9]{1,5}\\.[0-9]{1,5}",
        "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
        "[0-9]\\.[0-9]\\.[a-z]{1,4}",
        "\\.[0-9]\\.[0-9]",
        Just(String::new()),
    ]
}

proptest! {
    #[test]
    fn round_trip(input in arb_account_balance()) {
        let entity = AccountBalance::from_value(&input).unwrap();
        let serialized = serde_json::to_value(&entity).unwrap();
        prop_assert_eq!(AccountBalance::from_value(&serialized).unwrap(), entity);
    }

    #[test]
    fn token_info_round_trip(input in arb_token_info()) {
        let entity = TokenInfo::from_value(&input).unwrap();
        let serialized = serde_json::to_value(&entity).unwrap();
        prop_assert_eq!(TokenInfo::from_value(&serialized).unwrap(), entity);
    }

    #[test]
    fn idempotent(input in arb_account_balance()) {
        prop_assert_eq!(
            AccountBalance::from_value(&input).unwrap(),
            AccountBalance::from_value(&input).unwrap()
        );
    }

    #[test]
    fn missing_required_field_rejected(
        input in arb_account_balance(),
        field in prop_oneof![Just("account"), Just("balance"), Just("tokens")],
    ) {
        let mut input = input;
        input.as_object_mut().unwrap().remove(field);
        let err = AccountBalance::from_value(&input).unwrap_err();
        prop_assert_eq!(err.kind(), ValidationErrorKind::MissingField);
        prop_assert_eq!(err.field(), field);
    }

    #[test]
    fn malformed_id_rejected(id in arb_malformed_id(), balance in any::<u64>()) {
        let err = TokenBalance::from_value(&json!({ "token_id": id, "balance": balance })).unwrap_err();
        prop_assert_eq!(err.field(), "token_id");
        prop_assert_eq!(err.kind(), ValidationErrorKind::InvalidFormat);
    }

    #[test]
    fn negative_balance_rejected(balance in i64::MIN..0) {
        let input = json!({ "account": "0.0.1001", "balance": balance, "tokens": [] });
        let err = AccountBalance::from_value(&input).unwrap_err();
        prop_assert_eq!(err.field(), "balance");
        prop_assert_eq!(err.kind(), ValidationErrorKind::OutOfRange);
    }

    #[test]
    fn non_negative_balance_accepted(balance in 0i64..=i64::MAX) {
        let input = json!({ "account": "0.0.1001", "balance": balance, "tokens": [] });
        prop_assert_eq!(
            AccountBalance::from_value(&input).unwrap().balance,
            Hbar::from_tinybars(balance)
        );
    }

    #[test]
    fn nested_failure_carries_index(
        input in arb_account_balance(),
        bad in arb_malformed_id(),
        slot in any::<prop::sample::Index>(),
    ) {
        let mut input = input;
        let tokens = input["tokens"].as_array_mut().unwrap();
        tokens.push(json!({ "token_id": "0.0.1", "balance": 1 }));
        let i = slot.index(tokens.len());
        tokens[i]["token_id"] = json!(bad);

        let err = AccountBalance::from_value(&input).unwrap_err();
        prop_assert!(err.is_nested());
        let expected_path = format!("tokens[{i}].token_id");
        prop_assert_eq!(err.path(), expected_path);
        prop_assert_eq!(err.kind(), ValidationErrorKind::InvalidFormat);
    }

    #[test]
    fn checksum_verified_per_network(id in arb_entity_id(), network_index in 0usize..4) {
        let network = Network::ALL[network_index];
        let ctx = ValidationContext::builder().network(network).require_checksums(true).build();

        let good = id.to_string_with_checksum(network);
        prop_assert_eq!(ctx.parse_entity_id(&good).unwrap(), id);

        for other in Network::ALL {
            let checksum = id.checksum(other);
            if checksum != id.checksum(network) {
                let wrong = format!("{id}-{checksum}");
                prop_assert!(ctx.parse_entity_id(&wrong).is_err());
            }
        }
        prop_assert!(ctx.parse_entity_id(&id.to_string()).is_err());
    }
}
