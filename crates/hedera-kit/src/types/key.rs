//! Public key types for Hedera.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use ed25519_dalek::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::error::ParseKeyError;

/// DER (SubjectPublicKeyInfo) prefix of an ED25519 public key.
const ED25519_DER_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];
/// DER prefix of a compressed ECDSA secp256k1 public key.
const ECDSA_DER_PREFIX: [u8; 14] = [
    0x30, 0x2d, 0x30, 0x07, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x22, 0x00,
];

/// Key algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Ed25519 key (default for Hedera accounts).
    Ed25519,
    /// ECDSA secp256k1 key (EVM compatible).
    EcdsaSecp256k1,
}

impl KeyType {
    /// Get the mirror-node `_type` tag for this key type.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Ed25519 => "ED25519",
            KeyType::EcdsaSecp256k1 => "ECDSA_SECP256K1",
        }
    }

    /// Get the expected raw key length in bytes.
    pub fn key_len(&self) -> usize {
        match self {
            KeyType::Ed25519 => 32,
            KeyType::EcdsaSecp256k1 => 33, // Compressed
        }
    }

    fn der_prefix(&self) -> &'static [u8] {
        match self {
            KeyType::Ed25519 => &ED25519_DER_PREFIX,
            KeyType::EcdsaSecp256k1 => &ECDSA_DER_PREFIX,
        }
    }
}

impl FromStr for KeyType {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ED25519" => Ok(KeyType::Ed25519),
            "ECDSA_SECP256K1" => Ok(KeyType::EcdsaSecp256k1),
            other => Err(ParseKeyError::UnknownKeyType(other.to_string())),
        }
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ed25519 or ECDSA secp256k1 public key.
///
/// Parsed from hex, either raw (32 or 33 bytes) or DER encoded, with an
/// optional `0x` prefix. The bytes must be a point on the curve.
///
/// ```
/// use hedera_kit::{KeyType, PublicKey};
///
/// let key: PublicKey = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
///     .parse()
///     .unwrap();
/// assert_eq!(key.key_type(), KeyType::Ed25519);
/// assert!(key.to_string().starts_with("302a300506032b6570032100"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    key_type: KeyType,
    data: Vec<u8>,
}

impl PublicKey {
    /// Create an Ed25519 public key from raw 32 bytes, checking the curve point.
    pub fn ed25519_from_bytes(bytes: [u8; 32]) -> Result<Self, ParseKeyError> {
        VerifyingKey::from_bytes(&bytes).map_err(|_| ParseKeyError::InvalidCurvePoint)?;
        Ok(Self {
            key_type: KeyType::Ed25519,
            data: bytes.to_vec(),
        })
    }

    /// Parse hex that must hold a key of the given type.
    ///
    /// Used where the key type is declared separately, as in mirror-node
    /// `{"_type": "...", "key": "..."}` objects.
    pub fn parse_as(key_type: KeyType, s: &str) -> Result<Self, ParseKeyError> {
        let key: PublicKey = s.parse()?;
        if key.key_type != key_type {
            return Err(ParseKeyError::KeyTypeMismatch {
                expected: key_type,
                actual: key.key_type,
            });
        }
        Ok(key)
    }

    /// Get the key type.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Get the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Raw key bytes as lowercase hex.
    pub fn to_string_raw(&self) -> String {
        hex::encode(&self.data)
    }

    /// DER encoded key bytes.
    pub fn to_der_bytes(&self) -> Vec<u8> {
        let mut out = self.key_type.der_prefix().to_vec();
        out.extend_from_slice(&self.data);
        out
    }

    /// EVM address derived from an ECDSA key: the last 20 bytes of the
    /// keccak-256 hash of the uncompressed point. `None` for Ed25519 keys.
    ///
    /// ```
    /// use hedera_kit::PublicKey;
    ///
    /// let key: PublicKey =
    ///     "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
    ///         .parse()
    ///         .unwrap();
    /// assert_eq!(
    ///     key.to_evm_address().unwrap(),
    ///     "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
    /// );
    /// ```
    pub fn to_evm_address(&self) -> Option<String> {
        if self.key_type != KeyType::EcdsaSecp256k1 {
            return None;
        }
        let key = k256::PublicKey::from_sec1_bytes(&self.data).ok()?;
        let uncompressed = key.to_encoded_point(false);
        let hash = Keccak256::digest(&uncompressed.as_bytes()[1..]);
        Some(format!("0x{}", hex::encode(&hash[12..])))
    }

    fn from_raw(key_type: KeyType, data: &[u8]) -> Result<Self, ParseKeyError> {
        match key_type {
            KeyType::Ed25519 => {
                let bytes: [u8; 32] = data
                    .try_into()
                    .map_err(|_| ParseKeyError::InvalidLength(data.len()))?;
                VerifyingKey::from_bytes(&bytes).map_err(|_| ParseKeyError::InvalidCurvePoint)?;
            }
            KeyType::EcdsaSecp256k1 => {
                k256::PublicKey::from_sec1_bytes(data)
                    .map_err(|_| ParseKeyError::InvalidCurvePoint)?;
            }
        }
        Ok(Self {
            key_type,
            data: data.to_vec(),
        })
    }
}

impl FromStr for PublicKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(hex_str).map_err(|e| ParseKeyError::InvalidHex(e.to_string()))?;

        for key_type in [KeyType::Ed25519, KeyType::EcdsaSecp256k1] {
            if bytes.len() == key_type.key_len() {
                return Self::from_raw(key_type, &bytes);
            }
            if let Some(raw) = bytes.strip_prefix(key_type.der_prefix()) {
                if raw.len() == key_type.key_len() {
                    return Self::from_raw(key_type, raw);
                }
            }
        }

        Err(ParseKeyError::InvalidLength(bytes.len()))
    }
}

impl TryFrom<&str> for PublicKey {
    type Error = ParseKeyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_der_bytes()))
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}:{})", self.key_type, self.to_string_raw())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
