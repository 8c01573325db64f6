//! Entry points for untrusted input.
//!
//! Entity constructors are silent. These wrappers parse raw JSON, build the
//! requested entity, and log the outcome: `debug` on acceptance, `warn` with
//! the failing path on rejection.
//!
//! ```
//! use hedera_kit::{AccountBalance, decode};
//!
//! let balance: AccountBalance = decode::decode(
//!     r#"{"account": "0.0.1001", "balance": 100, "tokens": []}"#,
//! )
//! .unwrap();
//! assert_eq!(balance.account.num, 1001);
//!
//! let err = decode::decode::<AccountBalance>(r#"{"account": "0.0.1001"}"#).unwrap_err();
//! assert_eq!(err.as_validation().unwrap().field(), "balance");
//! ```

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Error;
use crate::validate::{Entity, ValidationContext};

/// Decode a JSON document into `T` under the default context.
pub fn decode<T: Entity>(json: &str) -> Result<T, Error> {
    decode_in(json, &ValidationContext::default())
}

/// Decode a JSON document into `T` under `ctx`.
pub fn decode_in<T: Entity>(json: &str, ctx: &ValidationContext) -> Result<T, Error> {
    let value: Value = serde_json::from_str(json).map_err(|e| {
        warn!(schema = T::SCHEMA, error = %e, "Malformed JSON");
        e
    })?;
    decode_value_in(&value, ctx)
}

/// Decode raw bytes, as read from a socket or file.
pub fn decode_slice<T: Entity>(bytes: &[u8], ctx: &ValidationContext) -> Result<T, Error> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        warn!(schema = T::SCHEMA, error = %e, "Malformed JSON");
        e
    })?;
    decode_value_in(&value, ctx)
}

/// Build `T` from an already parsed value under `ctx`.
pub fn decode_value_in<T: Entity>(value: &Value, ctx: &ValidationContext) -> Result<T, Error> {
    match T::from_value_in(value, ctx) {
        Ok(entity) => {
            debug!(schema = T::SCHEMA, "Entity accepted");
            Ok(entity)
        }
        Err(e) => {
            warn!(
                schema = T::SCHEMA,
                path = %e.path(),
                kind = ?e.kind(),
                error = %e,
                "Entity rejected"
            );
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountBalance, TokenBalance};
    use crate::error::ValidationErrorKind;

    #[test]
    fn test_decode_valid() {
        let b: TokenBalance = decode(r#"{"token_id": "0.0.1234", "balance": 0}"#).unwrap();
        assert_eq!(b.balance, 0);
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = decode::<TokenBalance>("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_decode_non_object() {
        let err = decode::<TokenBalance>("[1, 2, 3]").unwrap_err();
        let v = err.as_validation().unwrap();
        assert_eq!(v.field(), "$");
        assert_eq!(v.kind(), ValidationErrorKind::InvalidType);
    }

    #[test]
    fn test_decode_nested_failure() {
        let json = r#"{
            "account": "0.0.1001",
            "balance": 100,
            "tokens": [{"token_id": "bad-format", "balance": 100}]
        }"#;
        let err = decode::<AccountBalance>(json).unwrap_err();
        assert_eq!(err.as_validation().unwrap().path(), "tokens[0].token_id");
    }

    #[test]
    fn test_decode_slice_with_context() {
        let ctx = ValidationContext::mainnet().require_checksums(true).build();
        let ok: TokenBalance =
            decode_slice(br#"{"token_id": "0.0.1234-pikcw", "balance": 1}"#, &ctx).unwrap();
        assert_eq!(ok.token_id.num, 1234);
        assert!(decode_slice::<TokenBalance>(br#"{"token_id": "0.0.1234", "balance": 1}"#, &ctx).is_err());
    }
}
