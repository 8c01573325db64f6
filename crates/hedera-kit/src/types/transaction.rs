//! Transaction identifiers.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{AccountId, ConsensusTimestamp};
use crate::error::{ParseEntityIdError, ParseTransactionIdError};

/// A transaction identifier: the paying account plus the valid-start time.
///
/// Two textual forms are accepted:
/// - SDK form: `0.0.2@1700000000.000000001`
/// - Mirror-node form: `0.0.2-1700000000-000000001`
///
/// Display always uses the SDK form.
///
/// ```
/// use hedera_kit::TransactionId;
///
/// let a: TransactionId = "0.0.2@1700000000.000000001".parse().unwrap();
/// let b: TransactionId = "0.0.2-1700000000-000000001".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(b.to_string(), "0.0.2@1700000000.000000001");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransactionId {
    /// Account paying for the transaction.
    pub account_id: AccountId,
    /// Start of the transaction's validity window.
    pub valid_start: ConsensusTimestamp,
}

impl TransactionId {
    /// Create from parts.
    pub const fn new(account_id: AccountId, valid_start: ConsensusTimestamp) -> Self {
        Self {
            account_id,
            valid_start,
        }
    }

    /// Format in the mirror-node REST form (`0.0.2-1700000000-000000001`).
    pub fn to_mirror_string(&self) -> String {
        format!(
            "{}-{}-{:09}",
            self.account_id, self.valid_start.seconds, self.valid_start.nanos
        )
    }
}

impl TransactionId {
    /// Parse either textual form, reading the payer account with `parse_account`.
    ///
    /// [`FromStr`] uses plain [`EntityId`](super::EntityId) parsing; validation
    /// passes a context-aware parser so embedded checksums are verified.
    pub fn parse_with<F>(s: &str, parse_account: F) -> Result<Self, ParseTransactionIdError>
    where
        F: FnOnce(&str) -> Result<AccountId, ParseEntityIdError>,
    {
        if let Some((account, start)) = s.split_once('@') {
            return Ok(Self {
                account_id: parse_account(account)?,
                valid_start: start.parse()?,
            });
        }

        // Mirror form: the account part never contains '-', so split from the right.
        let mut parts = s.rsplitn(3, '-');
        let (Some(nanos), Some(seconds), Some(account)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseTransactionIdError::InvalidFormat(s.to_string()));
        };
        if nanos.len() != 9 {
            return Err(ParseTransactionIdError::InvalidFormat(s.to_string()));
        }

        Ok(Self {
            account_id: parse_account(account)?,
            valid_start: format!("{seconds}.{nanos}").parse()?,
        })
    }
}

impl FromStr for TransactionId {
    type Err = ParseTransactionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, str::parse)
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.account_id, self.valid_start)
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseTimestampError;
    use crate::types::EntityId;

    #[test]
    fn test_parse_sdk_form() {
        let id: TransactionId = "0.0.1001@1700000000.000000042".parse().unwrap();
        assert_eq!(id.account_id, EntityId::from_num(1001));
        assert_eq!(id.valid_start.seconds, 1_700_000_000);
        assert_eq!(id.valid_start.nanos, 42);
    }

    #[test]
    fn test_parse_mirror_form() {
        let id: TransactionId = "0.0.1001-1700000000-000000042".parse().unwrap();
        assert_eq!(id.to_mirror_string(), "0.0.1001-1700000000-000000042");
        assert_eq!(id.to_string(), "0.0.1001@1700000000.000000042");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            "garbage".parse::<TransactionId>(),
            Err(ParseTransactionIdError::InvalidFormat(_))
        ));
        assert!(matches!(
            "0.0.1001-1700000000-42".parse::<TransactionId>(),
            Err(ParseTransactionIdError::InvalidFormat(_))
        ));
        assert!(matches!(
            "abc@1700000000.0".parse::<TransactionId>(),
            Err(ParseTransactionIdError::Account(ParseEntityIdError::InvalidFormat(_)))
        ));
        assert!(matches!(
            "0.0.2@later".parse::<TransactionId>(),
            Err(ParseTransactionIdError::ValidStart(ParseTimestampError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_parse_with_custom_account_parser() {
        let rejected = TransactionId::parse_with("0.0.2@1.000000001", |a| {
            Err(ParseEntityIdError::MissingChecksum(a.to_string()))
        });
        assert!(matches!(
            rejected,
            Err(ParseTransactionIdError::Account(ParseEntityIdError::MissingChecksum(a))) if a == "0.0.2"
        ));

        // Mirror form hands the parser only the account part
        let id = TransactionId::parse_with("0.0.2-1-000000001", |a| {
            assert_eq!(a, "0.0.2");
            a.parse()
        })
        .unwrap();
        assert_eq!(id.account_id, EntityId::from_num(2));
    }

    #[test]
    fn test_serde_roundtrip() {
        let id: TransactionId = "0.0.2@1.000000001".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0.0.2@1.000000001\"");
        assert_eq!(serde_json::from_str::<TransactionId>(&json).unwrap(), id);
    }
}
