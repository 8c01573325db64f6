//! Network identification for Hedera.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The Hedera network an identifier or document belongs to.
///
/// Each network has a ledger id, which feeds the HIP-15 entity-id checksum,
/// and a name used in `did:hedera:<network>:...` identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Hedera mainnet (production network).
    #[default]
    Mainnet,
    /// Hedera testnet.
    Testnet,
    /// Hedera previewnet (next release candidate).
    Previewnet,
    /// Local node for development.
    Local,
}

impl Network {
    /// All known networks.
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Previewnet,
        Network::Local,
    ];

    /// Returns true if this is mainnet.
    pub fn is_mainnet(&self) -> bool {
        matches!(self, Network::Mainnet)
    }

    /// Returns true if this is testnet.
    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }

    /// Returns true if this is a local node.
    pub fn is_local(&self) -> bool {
        matches!(self, Network::Local)
    }

    /// Ledger id bytes, as used by the HIP-15 checksum.
    pub fn ledger_id(&self) -> &'static [u8] {
        match self {
            Network::Mainnet => &[0x00],
            Network::Testnet => &[0x01],
            Network::Previewnet => &[0x02],
            Network::Local => &[0x03],
        }
    }

    /// Returns the network identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Previewnet => "previewnet",
            Network::Local => "local",
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display() {
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert_eq!(Network::Previewnet.to_string(), "previewnet");
        assert_eq!(Network::Local.to_string(), "local");
    }

    #[test]
    fn test_network_parse() {
        for network in Network::ALL {
            assert_eq!(network.as_str().parse::<Network>(), Ok(network));
        }
        assert!("devnet".parse::<Network>().is_err());
        assert!("Mainnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_network_predicates() {
        assert!(Network::Mainnet.is_mainnet());
        assert!(!Network::Mainnet.is_testnet());
        assert!(Network::Testnet.is_testnet());
        assert!(Network::Local.is_local());
    }

    #[test]
    fn test_ledger_ids_are_distinct() {
        assert_eq!(Network::Mainnet.ledger_id(), &[0x00]);
        assert_eq!(Network::Testnet.ledger_id(), &[0x01]);
        assert_eq!(Network::Previewnet.ledger_id(), &[0x02]);
    }

    #[test]
    fn test_default_is_mainnet() {
        assert_eq!(Network::default(), Network::Mainnet);
    }
}
