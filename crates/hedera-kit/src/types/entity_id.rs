//! Ledger entity identifiers (`shard.realm.num`) with HIP-15 checksums.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Network;
use crate::error::ParseEntityIdError;

/// Modulus for the three-letter weighted digit sum.
const P3: u64 = 26 * 26 * 26;
/// Modulus for the five-letter checksum.
const P5: u64 = 26 * 26 * 26 * 26 * 26;
/// Smallest prime above one million, used for the final permutation.
const PERMUTATION: u64 = 1_000_003;
/// Digit weight; coprime to `P5`.
const WEIGHT: u64 = 31;

/// A Hedera ledger identifier: account, token, topic, file, contract or schedule.
///
/// The textual form is `shard.realm.num`, optionally followed by a HIP-15
/// checksum (`0.0.123-vfmkw`). Parsing keeps only the numeric components; a
/// checksum is verified only when a [`Network`] is known, via
/// [`EntityId::parse_checked`].
///
/// # Examples
///
/// ```
/// use hedera_kit::{EntityId, Network};
///
/// let id: EntityId = "0.0.1234".parse().unwrap();
/// assert_eq!(id.num, 1234);
/// assert_eq!(id.to_string(), "0.0.1234");
///
/// let id: EntityId = "0.0.123".parse().unwrap();
/// assert_eq!(id.checksum(Network::Mainnet), "vfmkw");
/// assert!("abc".parse::<EntityId>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    /// Shard number.
    pub shard: u64,
    /// Realm number.
    pub realm: u64,
    /// Entity number within the realm.
    pub num: u64,
}

/// Account identifier.
pub type AccountId = EntityId;
/// Token identifier.
pub type TokenId = EntityId;
/// Consensus topic identifier.
pub type TopicId = EntityId;
/// File identifier.
pub type FileId = EntityId;
/// Smart contract identifier.
pub type ContractId = EntityId;
/// Scheduled transaction identifier.
pub type ScheduleId = EntityId;
/// Account that a consensus node is paid through.
pub type NodeAccountId = EntityId;

impl EntityId {
    /// Create from components.
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }

    /// Create `0.0.num`, the common case on every public network.
    pub const fn from_num(num: u64) -> Self {
        Self::new(0, 0, num)
    }

    /// Split off and parse the numeric part, returning any checksum text.
    ///
    /// The checksum is only checked for shape here.
    pub fn parse_with_checksum(s: &str) -> Result<(Self, Option<&str>), ParseEntityIdError> {
        if s.is_empty() {
            return Err(ParseEntityIdError::Empty);
        }

        let (address, checksum) = match s.split_once('-') {
            Some((address, checksum)) => (address, Some(checksum)),
            None => (s, None),
        };

        let mut parts = address.split('.');
        let mut next = || -> Result<u64, ParseEntityIdError> {
            let part = parts
                .next()
                .ok_or_else(|| ParseEntityIdError::InvalidFormat(s.to_string()))?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseEntityIdError::InvalidFormat(s.to_string()));
            }
            part.parse()
                .map_err(|_| ParseEntityIdError::Overflow(s.to_string()))
        };

        let id = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(ParseEntityIdError::InvalidFormat(s.to_string()));
        }

        if let Some(checksum) = checksum {
            if checksum.len() != 5 || !checksum.chars().all(|c| c.is_ascii_lowercase()) {
                return Err(ParseEntityIdError::InvalidChecksum(checksum.to_string()));
            }
        }

        Ok((id, checksum))
    }

    /// Parse and, if a checksum is present, verify it against `network`.
    ///
    /// With `require_checksum`, an identifier without a checksum is rejected.
    ///
    /// ```
    /// use hedera_kit::{EntityId, Network};
    ///
    /// assert!(EntityId::parse_checked("0.0.123-esxsf", Network::Testnet, false).is_ok());
    /// assert!(EntityId::parse_checked("0.0.123-vfmkw", Network::Testnet, false).is_err());
    /// assert!(EntityId::parse_checked("0.0.123", Network::Testnet, true).is_err());
    /// ```
    pub fn parse_checked(
        s: &str,
        network: Network,
        require_checksum: bool,
    ) -> Result<Self, ParseEntityIdError> {
        let (id, checksum) = Self::parse_with_checksum(s)?;
        match checksum {
            Some(actual) => id.validate_checksum(actual, network)?,
            None if require_checksum => {
                return Err(ParseEntityIdError::MissingChecksum(s.to_string()));
            }
            None => {}
        }
        Ok(id)
    }

    /// Compute the HIP-15 checksum of this identifier for `network`.
    pub fn checksum(&self, network: Network) -> String {
        checksum(network.ledger_id(), &self.to_string())
    }

    /// Verify a checksum string against `network`.
    pub fn validate_checksum(&self, actual: &str, network: Network) -> Result<(), ParseEntityIdError> {
        let expected = self.checksum(network);
        if expected != actual {
            return Err(ParseEntityIdError::ChecksumMismatch {
                id: self.to_string(),
                expected,
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// Format as `shard.realm.num-checksum`.
    pub fn to_string_with_checksum(&self, network: Network) -> String {
        format!("{}-{}", self, self.checksum(network))
    }

    /// The 20-byte long-zero EVM address of this entity, hex encoded with `0x`.
    ///
    /// ```
    /// use hedera_kit::EntityId;
    ///
    /// let id = EntityId::from_num(1001);
    /// assert_eq!(id.to_solidity_address(), "0x00000000000000000000000000000000000003e9");
    /// ```
    pub fn to_solidity_address(&self) -> String {
        let mut bytes = [0u8; 20];
        // Shard is 4 bytes on the EVM side; values beyond that are truncated like the SDKs do.
        bytes[0..4].copy_from_slice(&(self.shard as u32).to_be_bytes());
        bytes[4..12].copy_from_slice(&self.realm.to_be_bytes());
        bytes[12..20].copy_from_slice(&self.num.to_be_bytes());
        format!("0x{}", hex::encode(bytes))
    }
}

/// HIP-15 checksum of a `shard.realm.num` string under a ledger id.
fn checksum(ledger_id: &[u8], address: &str) -> String {
    let digits: Vec<u64> = address
        .bytes()
        .map(|b| if b == b'.' { 10 } else { u64::from(b - b'0') })
        .collect();

    let mut sum_even = 0u64;
    let mut sum_odd = 0u64;
    let mut weighted = 0u64;
    for (i, d) in digits.iter().enumerate() {
        weighted = (WEIGHT * weighted + d) % P3;
        if i % 2 == 0 {
            sum_even = (sum_even + d) % 11;
        } else {
            sum_odd = (sum_odd + d) % 11;
        }
    }

    let mut ledger_hash = 0u64;
    for b in ledger_id.iter().copied().chain([0u8; 6]) {
        ledger_hash = (WEIGHT * ledger_hash + u64::from(b)) % P5;
    }

    let mut c = ((((address.len() as u64 % 5) * 11 + sum_even) * 11 + sum_odd) * P3
        + weighted
        + ledger_hash)
        % P5;
    c = (c * PERMUTATION) % P5;

    let mut letters = [b'a'; 5];
    for slot in letters.iter_mut().rev() {
        *slot = b'a' + (c % 26) as u8;
        c /= 26;
    }
    String::from_utf8_lossy(&letters).into_owned()
}

impl FromStr for EntityId {
    type Err = ParseEntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_checksum(s).map(|(id, _)| id)
    }
}

impl TryFrom<&str> for EntityId {
    type Error = ParseEntityIdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<u64> for EntityId {
    fn from(num: u64) -> Self {
        Self::from_num(num)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id: EntityId = "0.0.1234".parse().unwrap();
        assert_eq!(id, EntityId::new(0, 0, 1234));
        let id: EntityId = "1.2.3".parse().unwrap();
        assert_eq!((id.shard, id.realm, id.num), (1, 2, 3));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!("".parse::<EntityId>(), Err(ParseEntityIdError::Empty));
        assert!(matches!(
            "abc".parse::<EntityId>(),
            Err(ParseEntityIdError::InvalidFormat(_))
        ));
        assert!("0.0".parse::<EntityId>().is_err());
        assert!("0.0.1.2".parse::<EntityId>().is_err());
        assert!("0..1".parse::<EntityId>().is_err());
        assert!("0.0.-1".parse::<EntityId>().is_err());
        assert!("0.0.+1".parse::<EntityId>().is_err());
        assert!(" 0.0.1".parse::<EntityId>().is_err());
        assert!("0.0.1a".parse::<EntityId>().is_err());
    }

    #[test]
    fn test_parse_overflow() {
        assert!(matches!(
            "0.0.99999999999999999999999".parse::<EntityId>(),
            Err(ParseEntityIdError::Overflow(_))
        ));
    }

    #[test]
    fn test_parse_checksum_shape() {
        let (id, checksum) = EntityId::parse_with_checksum("0.0.123-vfmkw").unwrap();
        assert_eq!(id, EntityId::from_num(123));
        assert_eq!(checksum, Some("vfmkw"));

        assert!(matches!(
            EntityId::parse_with_checksum("0.0.123-VFMKW"),
            Err(ParseEntityIdError::InvalidChecksum(_))
        ));
        assert!(matches!(
            EntityId::parse_with_checksum("0.0.123-abc"),
            Err(ParseEntityIdError::InvalidChecksum(_))
        ));
    }

    // ========================================================================
    // HIP-15 checksum vectors
    // ========================================================================

    #[test]
    fn test_checksum_vectors() {
        let id = EntityId::from_num(123);
        assert_eq!(id.checksum(Network::Mainnet), "vfmkw");
        assert_eq!(id.checksum(Network::Testnet), "esxsf");
        assert_eq!(id.checksum(Network::Previewnet), "ogizo");

        let id = EntityId::from_num(1234);
        assert_eq!(id.checksum(Network::Mainnet), "pikcw");
        assert_eq!(id.checksum(Network::Testnet), "yvvkf");
    }

    #[test]
    fn test_checksum_verification() {
        assert!(EntityId::parse_checked("0.0.123-vfmkw", Network::Mainnet, false).is_ok());
        assert!(matches!(
            EntityId::parse_checked("0.0.123-vfmkw", Network::Testnet, false),
            Err(ParseEntityIdError::ChecksumMismatch { .. })
        ));
        assert!(matches!(
            EntityId::parse_checked("0.0.123", Network::Mainnet, true),
            Err(ParseEntityIdError::MissingChecksum(_))
        ));
        assert!(EntityId::parse_checked("0.0.123", Network::Mainnet, false).is_ok());
    }

    #[test]
    fn test_to_string_with_checksum() {
        assert_eq!(
            EntityId::from_num(3).to_string_with_checksum(Network::Mainnet),
            "0.0.3-tzfmz"
        );
    }

    #[test]
    fn test_solidity_address() {
        assert_eq!(
            EntityId::new(0, 0, 3).to_solidity_address(),
            "0x0000000000000000000000000000000000000003"
        );
    }

    #[test]
    fn test_serde_as_string() {
        let id = EntityId::from_num(1001);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0.0.1001\"");
        let parsed: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<EntityId>("\"bad\"").is_err());
    }

    #[test]
    fn test_ordering() {
        let a = EntityId::from_num(2);
        let b = EntityId::from_num(10);
        let c = EntityId::new(0, 1, 0);
        assert!(a < b);
        assert!(b < c);
    }
}
