//! Error types for hedera-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) — Main error type, returned by the decode and schema entry points
//!   - [`ValidationError`] — An entity refused construction (missing field, wrong type,
//!     bad format, out-of-range value, or an invalid nested entity)
//!   - [`ParseEntityIdError`] — Invalid `shard.realm.num` identifier
//!   - [`ParseTimestampError`] — Invalid ISO-8601 or consensus timestamp
//!   - [`ParseTransactionIdError`] — Invalid transaction ID
//!   - [`ParseAmountError`] — Invalid hbar amount
//!   - [`ParseKeyError`] — Invalid public key
//!   - [`ParseDidError`] — Invalid Hedera DID
//!   - [`ParseMultibaseError`] — Invalid multibase string
//!
//! # Inspecting Validation Failures
//!
//! ```
//! use hedera_kit::{AccountBalance, Entity, ValidationErrorKind};
//! use serde_json::json;
//!
//! let err = AccountBalance::from_value(&json!({
//!     "account": "0.0.1001",
//!     "balance": 100,
//!     "tokens": [{ "token_id": "bad-format", "balance": 100 }]
//! }))
//! .unwrap_err();
//!
//! assert_eq!(err.path(), "tokens[0].token_id");
//! assert_eq!(err.kind(), ValidationErrorKind::InvalidFormat);
//! ```

use thiserror::Error;

use crate::types::KeyType;

/// Error parsing a `shard.realm.num` entity ID.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseEntityIdError {
    #[error("Entity ID is empty")]
    Empty,

    #[error("Entity ID '{0}' has invalid format (expected 'shard.realm.num')")]
    InvalidFormat(String),

    #[error("Entity ID '{0}' has a component that does not fit in 64 bits")]
    Overflow(String),

    #[error("Entity ID checksum '{0}' is invalid (expected five lowercase letters)")]
    InvalidChecksum(String),

    #[error("Entity ID '{id}' has checksum '{actual}', expected '{expected}' for this network")]
    ChecksumMismatch {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("Entity ID '{0}' has no checksum")]
    MissingChecksum(String),
}

/// Error parsing an ISO-8601 or consensus timestamp.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseTimestampError {
    #[error("Timestamp '{0}' is not valid ISO-8601")]
    InvalidIso8601(String),

    #[error("Consensus timestamp '{0}' has invalid format (expected 'seconds.nanos')")]
    InvalidFormat(String),

    #[error("Consensus timestamp '{0}' has more than 9 fractional digits")]
    TooPrecise(String),

    #[error("Consensus timestamp '{0}' is out of range")]
    OutOfRange(String),
}

/// Error parsing a transaction ID.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseTransactionIdError {
    #[error("Transaction ID '{0}' has invalid format (expected 'shard.realm.num@seconds.nanos')")]
    InvalidFormat(String),

    #[error("Invalid payer account in transaction ID: {0}")]
    Account(#[from] ParseEntityIdError),

    #[error("Invalid valid-start in transaction ID: {0}")]
    ValidStart(#[from] ParseTimestampError),
}

/// Error parsing an hbar amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("Ambiguous amount '{0}'. Use explicit units like '5 hbar' or '1000 tinybar'")]
    AmbiguousAmount(String),

    #[error("Invalid amount format: '{0}'")]
    InvalidFormat(String),

    #[error("Invalid number in amount: '{0}'")]
    InvalidNumber(String),

    #[error("Amount overflow: value too large")]
    Overflow,
}

/// Error parsing a public key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseKeyError {
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Invalid key length: {0} bytes does not match an ED25519 or ECDSA secp256k1 key")]
    InvalidLength(usize),

    #[error("Unknown key type: '{0}'")]
    UnknownKeyType(String),

    #[error("Key type mismatch: expected {expected} key, got {actual} key")]
    KeyTypeMismatch { expected: KeyType, actual: KeyType },

    #[error("Invalid curve point: key bytes do not represent a valid point on the curve")]
    InvalidCurvePoint,
}

/// Error parsing a Hedera DID.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseDidError {
    #[error("DID '{0}' does not start with 'did:hedera:'")]
    InvalidMethod(String),

    #[error("DID network '{0}' is not one of mainnet, testnet, previewnet, local")]
    UnknownNetwork(String),

    #[error("DID '{0}' has invalid format (expected 'did:hedera:<network>:<key>_<topic>')")]
    InvalidFormat(String),

    #[error("DID key '{0}' is not a base58 encoded 32-byte key")]
    InvalidKey(String),

    #[error("Invalid DID topic: {0}")]
    Topic(#[from] ParseEntityIdError),
}

/// Error parsing a multibase string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseMultibaseError {
    #[error("Multibase string is empty")]
    Empty,

    #[error("Unsupported multibase prefix '{0}' (only base58btc 'z' is supported)")]
    UnsupportedBase(char),

    #[error("Invalid base58 encoding: {0}")]
    InvalidBase58(String),
}

// ============================================================================
// Validation Errors
// ============================================================================

/// The kind of rule an entity failed, independent of where it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A required field is absent or `null`.
    MissingField,
    /// A field has the wrong JSON type.
    InvalidType,
    /// A field failed a format rule (pattern, enum membership, fixed value).
    InvalidFormat,
    /// A numeric or length bound was violated.
    OutOfRange,
}

/// An entity refused construction.
///
/// Exactly one error is reported per failed construction: the first rule
/// violated, in the entity's field order. Failures inside nested entities are
/// wrapped in [`ValidationError::InvalidNested`], so [`path`](Self::path)
/// names the full location of the offending field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    #[error("Field '{field}' has invalid type: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("Invalid nested entity at '{field}': {source}")]
    InvalidNested {
        field: String,
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Create a missing-field error.
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid-type error.
    pub fn invalid_type(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        ValidationError::InvalidType {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Create a format error.
    pub fn format(field: impl Into<String>, reason: impl ToString) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an out-of-range error.
    pub fn range(field: impl Into<String>, reason: impl ToString) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a child entity's failure under the parent's field name.
    pub fn nested(field: impl Into<String>, source: ValidationError) -> Self {
        ValidationError::InvalidNested {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// The field this error is attached to, at its own nesting level.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::InvalidType { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidNested { field, .. } => field,
        }
    }

    /// Full path to the offending field, e.g. `tokens[0].token_id`.
    pub fn path(&self) -> String {
        match self {
            ValidationError::InvalidNested { field, source } => {
                let rest = source.path();
                if rest.starts_with('[') {
                    format!("{field}{rest}")
                } else {
                    format!("{field}.{rest}")
                }
            }
            other => other.field().to_string(),
        }
    }

    /// The innermost error, after unwrapping nested-entity layers.
    pub fn root_cause(&self) -> &ValidationError {
        match self {
            ValidationError::InvalidNested { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The kind of the root cause.
    pub fn kind(&self) -> ValidationErrorKind {
        match self.root_cause() {
            ValidationError::MissingField { .. } => ValidationErrorKind::MissingField,
            ValidationError::InvalidType { .. } => ValidationErrorKind::InvalidType,
            ValidationError::InvalidFormat { .. } => ValidationErrorKind::InvalidFormat,
            ValidationError::OutOfRange { .. } => ValidationErrorKind::OutOfRange,
            ValidationError::InvalidNested { .. } => unreachable!("root_cause unwraps nesting"),
        }
    }

    /// Returns true if a nested entity caused this failure.
    pub fn is_nested(&self) -> bool {
        matches!(self, ValidationError::InvalidNested { .. })
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for hedera-kit operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Validation ───
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown schema: '{0}'")]
    UnknownSchema(String),

    // ─── Parsing ───
    #[error(transparent)]
    ParseEntityId(#[from] ParseEntityIdError),

    #[error(transparent)]
    ParseTimestamp(#[from] ParseTimestampError),

    #[error(transparent)]
    ParseTransactionId(#[from] ParseTransactionIdError),

    #[error(transparent)]
    ParseAmount(#[from] ParseAmountError),

    #[error(transparent)]
    ParseKey(#[from] ParseKeyError),

    #[error(transparent)]
    ParseDid(#[from] ParseDidError),

    #[error(transparent)]
    ParseMultibase(#[from] ParseMultibaseError),

    // ─── Serialization ───
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the validation failure, if this error is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }
}
