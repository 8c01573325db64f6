//! Multibase-encoded key material.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseMultibaseError;

/// Multibase prefix for base58btc.
const BASE58BTC_PREFIX: char = 'z';

/// A base58btc multibase string (`z...`).
///
/// Only the encoding is checked here; what the bytes must contain is up to
/// the field that holds it.
///
/// ```
/// use hedera_kit::Multibase;
///
/// let mb = Multibase::encode(&[0xed, 0x01, 0x02]);
/// assert!(mb.as_str().starts_with('z'));
/// assert_eq!(mb.decode(), vec![0xed, 0x01, 0x02]);
/// assert!("m3q".parse::<Multibase>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Multibase {
    encoded: String,
    bytes: Vec<u8>,
}

impl Multibase {
    /// Encode bytes as base58btc multibase.
    pub fn encode(bytes: &[u8]) -> Self {
        Self {
            encoded: format!("{BASE58BTC_PREFIX}{}", bs58::encode(bytes).into_string()),
            bytes: bytes.to_vec(),
        }
    }

    /// The decoded bytes.
    pub fn decode(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Borrow the decoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The encoded string, including the prefix.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl FromStr for Multibase {
    type Err = ParseMultibaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let prefix = chars.next().ok_or(ParseMultibaseError::Empty)?;
        if prefix != BASE58BTC_PREFIX {
            return Err(ParseMultibaseError::UnsupportedBase(prefix));
        }
        let body = chars.as_str();
        if body.is_empty() {
            return Err(ParseMultibaseError::Empty);
        }
        let bytes = bs58::decode(body)
            .into_vec()
            .map_err(|e| ParseMultibaseError::InvalidBase58(e.to_string()))?;
        Ok(Self {
            encoded: s.to_string(),
            bytes,
        })
    }
}

impl Display for Multibase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl Serialize for Multibase {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for Multibase {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let mb = Multibase::encode(b"hello");
        let parsed: Multibase = mb.as_str().parse().unwrap();
        assert_eq!(parsed.as_bytes(), b"hello");
        assert_eq!(parsed, mb);
    }

    #[test]
    fn test_rejects_other_bases() {
        assert_eq!(
            "f68656c6c6f".parse::<Multibase>(),
            Err(ParseMultibaseError::UnsupportedBase('f'))
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!("".parse::<Multibase>(), Err(ParseMultibaseError::Empty));
        assert_eq!("z".parse::<Multibase>(), Err(ParseMultibaseError::Empty));
    }

    #[test]
    fn test_rejects_bad_base58() {
        // '0' is not in the base58 alphabet
        assert!(matches!(
            "z0abc".parse::<Multibase>(),
            Err(ParseMultibaseError::InvalidBase58(_))
        ));
    }
}
