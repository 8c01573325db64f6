//! Field rules.
//!
//! Each rule takes the field name and the value already read from the input,
//! and returns a [`ValidationError`] naming the field and the rule it broke.
//! Rules compose with `?` inside an entity's `from_fields`.

use std::fmt::Display;
use std::net::Ipv4Addr;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::ValidationError;

/// Maximum memo length in bytes for accounts, tokens, topics and transfers.
pub const MAX_MEMO_BYTES: usize = 100;

/// Value must be zero or greater.
pub fn non_negative<T>(field: &str, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default + Display,
{
    if value < T::default() {
        return Err(ValidationError::range(
            field,
            format!("must be non-negative, got {value}"),
        ));
    }
    Ok(())
}

/// Value must be strictly greater than zero.
pub fn positive<T>(field: &str, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default + Display,
{
    if value <= T::default() {
        return Err(ValidationError::range(
            field,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(())
}

/// Value must lie in `min..=max`.
pub fn in_range<T>(field: &str, value: T, min: T, max: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(ValidationError::range(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

/// String must be at most `max` bytes long.
pub fn max_len(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.len() > max {
        return Err(ValidationError::range(
            field,
            format!("must be at most {max} bytes, got {}", value.len()),
        ));
    }
    Ok(())
}

/// Memo must fit the ledger's memo limit.
pub fn memo(field: &str, value: &str) -> Result<(), ValidationError> {
    max_len(field, value, MAX_MEMO_BYTES)
}

/// String must not be empty.
pub fn non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::format(field, "must not be empty"));
    }
    Ok(())
}

/// List must hold at least one item.
pub fn non_empty_list<T>(field: &str, items: &[T]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::range(field, "must contain at least one item"));
    }
    Ok(())
}

/// String must be one of `allowed`.
pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if !allowed.contains(&value) {
        return Err(ValidationError::format(
            field,
            format!("must be one of {}, got '{value}'", allowed.join(", ")),
        ));
    }
    Ok(())
}

/// String must equal a fixed tag, such as a suite name or context URI.
pub fn equals(field: &str, value: &str, expected: &str) -> Result<(), ValidationError> {
    if value != expected {
        return Err(ValidationError::format(
            field,
            format!("must be '{expected}', got '{value}'"),
        ));
    }
    Ok(())
}

/// Hex string (optional `0x`), optionally of an exact byte length.
pub fn hex_bytes(field: &str, value: &str, len: Option<usize>) -> Result<Vec<u8>, ValidationError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(digits)
        .map_err(|e| ValidationError::format(field, format!("invalid hex: {e}")))?;
    if let Some(len) = len {
        if bytes.len() != len {
            return Err(ValidationError::format(
                field,
                format!("must be {len} bytes, got {}", bytes.len()),
            ));
        }
    }
    Ok(bytes)
}

/// Standard base64 string.
pub fn base64_bytes(field: &str, value: &str) -> Result<Vec<u8>, ValidationError> {
    STANDARD
        .decode(value)
        .map_err(|e| ValidationError::format(field, format!("invalid base64: {e}")))
}

/// A 48-byte SHA-384 running hash, given as hex or base64.
pub fn sha384_hash(field: &str, value: &str) -> Result<(), ValidationError> {
    let bytes = match hex_bytes(field, value, None) {
        Ok(bytes) => bytes,
        Err(_) => base64_bytes(field, value)?,
    };
    if bytes.len() != 48 {
        return Err(ValidationError::format(
            field,
            format!("must be a 48-byte hash, got {} bytes", bytes.len()),
        ));
    }
    Ok(())
}

/// `0x` followed by 40 hex digits.
pub fn evm_address(field: &str, value: &str) -> Result<(), ValidationError> {
    if !value.starts_with("0x") {
        return Err(ValidationError::format(field, "must start with '0x'"));
    }
    hex_bytes(field, value, Some(20)).map(|_| ())
}

/// Absolute `http` or `https` URL with a host.
pub fn url(field: &str, value: &str) -> Result<(), ValidationError> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(|| ValidationError::format(field, format!("must be an http(s) URL, got '{value}'")))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(ValidationError::format(
            field,
            format!("URL '{value}' has no valid host"),
        ));
    }
    Ok(())
}

/// Dotted-quad IPv4 address.
pub fn ipv4(field: &str, value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Ipv4Addr>()
        .map(|_| ())
        .map_err(|_| ValidationError::format(field, format!("'{value}' is not an IPv4 address")))
}

/// Decimal string of a non-negative integer (large tinybar totals).
pub fn decimal_u64(field: &str, value: &str) -> Result<u64, ValidationError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::format(
            field,
            format!("'{value}' is not a decimal integer"),
        ));
    }
    value
        .parse()
        .map_err(|_| ValidationError::range(field, format!("'{value}' does not fit in 64 bits")))
}
