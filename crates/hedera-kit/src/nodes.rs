//! Network nodes and network-wide metrics.

use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::error::ValidationError;
use crate::types::{ConsensusTimestamp, Hbar, NodeAccountId};
use crate::validate::{Entity, Fields, deserialize_via_entity, rules};

/// Longest DNS name accepted for a service endpoint.
pub const MAX_DOMAIN_BYTES: usize = 253;

// =============================================================================
// Nodes
// =============================================================================

/// An address a node serves gRPC traffic on.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceEndpoint {
    pub ip_address_v4: Option<String>,
    pub domain_name: Option<String>,
    pub port: u16,
}

impl ServiceEndpoint {
    /// `host:port`, preferring the domain name.
    pub fn authority(&self) -> String {
        let host = self
            .domain_name
            .as_deref()
            .or(self.ip_address_v4.as_deref())
            .unwrap_or_default();
        format!("{host}:{}", self.port)
    }
}

impl Entity for ServiceEndpoint {
    const SCHEMA: &'static str = "ServiceEndpoint";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let ip_address_v4 = f.opt_string("ip_address_v4")?;
        if let Some(ip) = &ip_address_v4 {
            rules::ipv4("ip_address_v4", ip)?;
        }
        let domain_name = f.opt_string("domain_name")?;
        if let Some(domain) = &domain_name {
            rules::non_empty("domain_name", domain)?;
            if f.is_strict() {
                rules::max_len("domain_name", domain, MAX_DOMAIN_BYTES)?;
            }
        }
        if ip_address_v4.is_none() && domain_name.is_none() {
            return Err(ValidationError::format(
                "ip_address_v4",
                "either ip_address_v4 or domain_name is required",
            ));
        }
        let port = f.u64("port")?;
        rules::in_range("port", port, 1, u64::from(u16::MAX))?;
        Ok(Self {
            ip_address_v4,
            domain_name,
            port: port as u16,
        })
    }
}

/// A consensus node as listed in the network address book.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkNode {
    pub node_id: u64,
    pub node_account_id: NodeAccountId,
    pub description: Option<String>,
    /// Node's hex encoded public key (typically an RSA key in DER form).
    pub public_key: String,
    pub service_endpoints: Vec<ServiceEndpoint>,
    pub stake: Option<Hbar>,
    pub min_stake: Option<Hbar>,
    pub max_stake: Option<Hbar>,
    pub timestamp: Option<ConsensusTimestamp>,
}

impl Entity for NetworkNode {
    const SCHEMA: &'static str = "NetworkNode";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let node_id = f.u64("node_id")?;
        let node_account_id = f.entity_id("node_account_id")?;
        let description = f.opt_string("description")?;
        let public_key = f.string("public_key")?;
        rules::non_empty("public_key", &public_key)?;
        rules::hex_bytes("public_key", &public_key, None)?;
        let service_endpoints = f.entities("service_endpoints")?;
        let stake = f.opt_hbar("stake")?;
        let min_stake = f.opt_hbar("min_stake")?;
        let max_stake = f.opt_hbar("max_stake")?;
        for (name, value) in [("stake", stake), ("min_stake", min_stake), ("max_stake", max_stake)] {
            if let Some(value) = value {
                rules::non_negative(name, value)?;
            }
        }
        if let (Some(min), Some(max)) = (min_stake, max_stake) {
            if min > max {
                return Err(ValidationError::range(
                    "min_stake",
                    format!("{min} exceeds max_stake {max}"),
                ));
            }
        }
        let timestamp = f.opt_parse("timestamp")?;
        Ok(Self {
            node_id,
            node_account_id,
            description,
            public_key,
            service_endpoints,
            stake,
            min_stake,
            max_stake,
            timestamp,
        })
    }
}

// =============================================================================
// Metrics
// =============================================================================

/// Circulating and total hbar supply, in tinybars.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkSupply {
    #[serde_as(as = "DisplayFromStr")]
    pub released_supply: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub total_supply: u64,
    pub timestamp: ConsensusTimestamp,
}

impl NetworkSupply {
    /// Tinybars not yet released.
    pub fn unreleased_supply(&self) -> u64 {
        self.total_supply - self.released_supply
    }
}

impl Entity for NetworkSupply {
    const SCHEMA: &'static str = "NetworkSupply";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let released_supply = rules::decimal_u64("released_supply", f.str("released_supply")?)?;
        let total_supply = rules::decimal_u64("total_supply", f.str("total_supply")?)?;
        if released_supply > total_supply {
            return Err(ValidationError::range(
                "released_supply",
                format!("{released_supply} exceeds total supply {total_supply}"),
            ));
        }
        let timestamp = f.parse("timestamp")?;
        Ok(Self {
            released_supply,
            total_supply,
            timestamp,
        })
    }
}

/// The hbar to US cent exchange rate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExchangeRate {
    pub cent_equivalent: u64,
    pub hbar_equivalent: u64,
    /// Unix seconds at which the rate stops applying.
    pub expiration_time: u64,
}

impl ExchangeRate {
    /// US cents one hbar is worth.
    pub fn cents_per_hbar(&self) -> f64 {
        self.cent_equivalent as f64 / self.hbar_equivalent as f64
    }

    /// Value of `amount` in US cents, rounded down. `None` on overflow.
    pub fn to_cents(&self, amount: Hbar) -> Option<i128> {
        i128::from(amount.as_tinybars())
            .checked_mul(i128::from(self.cent_equivalent))?
            .checked_div(i128::from(self.hbar_equivalent) * i128::from(Hbar::ONE_HBAR.as_tinybars()))
    }
}

impl Entity for ExchangeRate {
    const SCHEMA: &'static str = "ExchangeRate";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let cent_equivalent = f.u64("cent_equivalent")?;
        rules::positive("cent_equivalent", cent_equivalent)?;
        let hbar_equivalent = f.u64("hbar_equivalent")?;
        rules::positive("hbar_equivalent", hbar_equivalent)?;
        let expiration_time = f.u64("expiration_time")?;
        Ok(Self {
            cent_equivalent,
            hbar_equivalent,
            expiration_time,
        })
    }
}

/// The current and next exchange rates, as published in the rate file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExchangeRateSet {
    pub current_rate: ExchangeRate,
    pub next_rate: ExchangeRate,
    pub timestamp: ConsensusTimestamp,
}

impl Entity for ExchangeRateSet {
    const SCHEMA: &'static str = "ExchangeRateSet";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let current_rate: ExchangeRate = f.entity("current_rate")?;
        let next_rate: ExchangeRate = f.entity("next_rate")?;
        if next_rate.expiration_time < current_rate.expiration_time {
            return Err(ValidationError::nested(
                "next_rate",
                ValidationError::range(
                    "expiration_time",
                    "must not expire before the current rate",
                ),
            ));
        }
        let timestamp = f.parse("timestamp")?;
        Ok(Self {
            current_rate,
            next_rate,
            timestamp,
        })
    }
}

/// Network-wide staking figures for a staking period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkStake {
    pub max_stake_rewarded: Hbar,
    pub stake_total: Hbar,
    /// Start of the staking period.
    pub staking_period: ConsensusTimestamp,
    /// Length of a staking period, in minutes.
    pub staking_period_duration: u64,
    /// Tinybars rewarded per hbar staked, per period.
    pub reward_rate: u64,
}

impl Entity for NetworkStake {
    const SCHEMA: &'static str = "NetworkStake";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let max_stake_rewarded = f.hbar("max_stake_rewarded")?;
        rules::non_negative("max_stake_rewarded", max_stake_rewarded)?;
        let stake_total = f.hbar("stake_total")?;
        rules::non_negative("stake_total", stake_total)?;
        let staking_period = f.parse("staking_period")?;
        let staking_period_duration = f.u64("staking_period_duration")?;
        rules::positive("staking_period_duration", staking_period_duration)?;
        let reward_rate = f.u64("reward_rate")?;
        Ok(Self {
            max_stake_rewarded,
            stake_total,
            staking_period,
            staking_period_duration,
            reward_rate,
        })
    }
}

deserialize_via_entity!(
    ServiceEndpoint,
    NetworkNode,
    NetworkSupply,
    ExchangeRate,
    ExchangeRateSet,
    NetworkStake,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use serde_json::{Value, json};

    fn node_json() -> Value {
        json!({
            "node_id": 0,
            "node_account_id": "0.0.3",
            "description": "Hosted by example",
            "public_key": "0x308201a2300d06092a864886f70d01010105000382018f00",
            "service_endpoints": [
                { "ip_address_v4": "35.237.200.180", "port": 50211 },
                { "domain_name": "node0.example.com", "port": 50212 }
            ],
            "stake": 100000000,
            "min_stake": 0,
            "max_stake": 4500000000000000i64,
            "timestamp": "1700000000.000000000"
        })
    }

    #[test]
    fn test_endpoint_domain_length_by_mode() {
        let endpoint = |len: usize| json!({ "domain_name": "a".repeat(len), "port": 50211 });

        assert!(ServiceEndpoint::from_value(&endpoint(MAX_DOMAIN_BYTES)).is_ok());
        let err = ServiceEndpoint::from_value(&endpoint(MAX_DOMAIN_BYTES + 1)).unwrap_err();
        assert_eq!(err.field(), "domain_name");
        assert_eq!(err.kind(), ValidationErrorKind::OutOfRange);

        let lenient = crate::ValidationContext::builder().lenient().build();
        let ok = ServiceEndpoint::from_value_in(&endpoint(MAX_DOMAIN_BYTES + 1), &lenient).unwrap();
        assert_eq!(ok.domain_name.map(|d| d.len()), Some(MAX_DOMAIN_BYTES + 1));

        // Emptiness is checked in both modes
        assert!(ServiceEndpoint::from_value_in(&endpoint(0), &lenient).is_err());
    }

    fn rate(cents: u64, hbars: u64, expires: u64) -> Value {
        json!({ "cent_equivalent": cents, "hbar_equivalent": hbars, "expiration_time": expires })
    }

    // ========================================================================
    // Node tests
    // ========================================================================

    #[test]
    fn test_network_node_valid() {
        let node = NetworkNode::from_value(&node_json()).unwrap();
        assert_eq!(node.service_endpoints.len(), 2);
        assert_eq!(node.service_endpoints[0].authority(), "35.237.200.180:50211");
        assert_eq!(node.service_endpoints[1].authority(), "node0.example.com:50212");
        assert_eq!(node.stake, Some(Hbar::hbar(1)));
    }

    #[test]
    fn test_network_node_round_trip() {
        let node = NetworkNode::from_value(&node_json()).unwrap();
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(NetworkNode::from_value(&value).unwrap(), node);
    }

    #[test]
    fn test_endpoint_port_range() {
        let mut value = node_json();
        value["service_endpoints"][1]["port"] = json!(70000);
        let err = NetworkNode::from_value(&value).unwrap_err();
        assert_eq!(err.path(), "service_endpoints[1].port");
        assert_eq!(err.kind(), ValidationErrorKind::OutOfRange);

        value["service_endpoints"][1]["port"] = json!(0);
        assert!(NetworkNode::from_value(&value).is_err());
    }

    #[test]
    fn test_endpoint_needs_address() {
        let err = ServiceEndpoint::from_value(&json!({ "port": 50211 })).unwrap_err();
        assert_eq!(err.field(), "ip_address_v4");

        let err = ServiceEndpoint::from_value(&json!({ "ip_address_v4": "35.237.200", "port": 1 }))
            .unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::InvalidFormat);
    }

    #[test]
    fn test_network_node_stake_bounds() {
        let mut value = node_json();
        value["stake"] = json!(-1);
        assert_eq!(NetworkNode::from_value(&value).unwrap_err().field(), "stake");

        let mut value = node_json();
        value["min_stake"] = json!(5);
        value["max_stake"] = json!(4);
        assert_eq!(NetworkNode::from_value(&value).unwrap_err().field(), "min_stake");
    }

    // ========================================================================
    // Metric tests
    // ========================================================================

    #[test]
    fn test_network_supply() {
        let value = json!({
            "released_supply": "3999999999999999949",
            "total_supply": "5000000000000000000",
            "timestamp": "1700000000.000000000"
        });
        let supply = NetworkSupply::from_value(&value).unwrap();
        assert_eq!(supply.unreleased_supply(), 1_000_000_000_000_000_051);
        assert_eq!(serde_json::to_value(&supply).unwrap(), value);
    }

    #[test]
    fn test_network_supply_released_over_total() {
        let err = NetworkSupply::from_value(&json!({
            "released_supply": "6",
            "total_supply": "5",
            "timestamp": "1700000000.000000000"
        }))
        .unwrap_err();
        assert_eq!(err.field(), "released_supply");
    }

    #[test]
    fn test_network_supply_requires_strings() {
        let err = NetworkSupply::from_value(&json!({
            "released_supply": 6,
            "total_supply": "5",
            "timestamp": "1700000000.000000000"
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::InvalidType);
    }

    #[test]
    fn test_exchange_rate() {
        let current = ExchangeRate::from_value(&rate(12, 1, 1_700_000_000)).unwrap();
        assert_eq!(current.cents_per_hbar(), 12.0);
        assert_eq!(current.to_cents(Hbar::hbar(10)), Some(120));

        let err = ExchangeRate::from_value(&rate(12, 0, 1)).unwrap_err();
        assert_eq!(err.field(), "hbar_equivalent");
    }

    #[test]
    fn test_exchange_rate_set() {
        let value = json!({
            "current_rate": rate(12, 1, 1_700_000_000),
            "next_rate": rate(13, 1, 1_700_003_600),
            "timestamp": "1699999999.000000000"
        });
        assert!(ExchangeRateSet::from_value(&value).is_ok());

        let mut value = value;
        value["next_rate"]["expiration_time"] = json!(1);
        let err = ExchangeRateSet::from_value(&value).unwrap_err();
        assert_eq!(err.path(), "next_rate.expiration_time");
    }

    #[test]
    fn test_network_stake() {
        let value = json!({
            "max_stake_rewarded": 1000,
            "stake_total": 5000,
            "staking_period": "1700000000.000000000",
            "staking_period_duration": 1440,
            "reward_rate": 100
        });
        let stake = NetworkStake::from_value(&value).unwrap();
        assert_eq!(stake.stake_total, Hbar::tinybar(5000));

        let mut value = value;
        value["staking_period_duration"] = json!(0);
        assert_eq!(
            NetworkStake::from_value(&value).unwrap_err().field(),
            "staking_period_duration"
        );
    }
}
