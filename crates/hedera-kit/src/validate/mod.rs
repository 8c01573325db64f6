//! The validated value object pattern.
//!
//! Every ledger entity in this crate implements [`Entity`]: it is built from an
//! untrusted JSON object, and construction either yields a fully valid value or
//! the first [`ValidationError`] encountered. There is no way to hold a
//! half-validated entity.
//!
//! # Example
//!
//! ```
//! use hedera_kit::{Entity, TokenBalance};
//! use serde_json::json;
//!
//! let balance = TokenBalance::from_value(&json!({
//!     "token_id": "0.0.1234",
//!     "balance": 0
//! }))
//! .unwrap();
//! assert_eq!(balance.token_id.num, 1234);
//!
//! let err = TokenBalance::from_value(&json!({ "token_id": "0.0.1234", "balance": -5 }))
//!     .unwrap_err();
//! assert_eq!(err.field(), "balance");
//! ```

mod context;
mod fields;
pub mod rules;

pub use context::{ValidationContext, ValidationContextBuilder};
pub use fields::{Fields, json_type};

use serde_json::Value;

use crate::error::{Error, ValidationError};

/// A ledger entity that validates itself on construction.
pub trait Entity: Sized {
    /// Name this entity is registered under in the schema table.
    const SCHEMA: &'static str;

    /// Build the entity from an object's fields.
    ///
    /// Fields are read, and rules checked, in declaration order; the first
    /// failure is returned.
    fn from_fields(fields: &Fields<'_>) -> Result<Self, ValidationError>;

    /// Build from a JSON value under the default context.
    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        Self::from_value_in(value, &ValidationContext::default())
    }

    /// Build from a JSON value under `ctx`.
    fn from_value_in(value: &Value, ctx: &ValidationContext) -> Result<Self, ValidationError> {
        let fields = Fields::new(value, ctx)?;
        Self::from_fields(&fields)
    }

    /// Parse and build from a JSON document under the default context.
    fn from_json(json: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }
}

/// A closed set of string tags, such as a token type.
pub trait Tag: Sized + Copy + 'static {
    /// Every tag, in the order they are listed in error messages.
    const ALL: &'static [Self];

    /// The wire form of this tag.
    fn as_str(&self) -> &'static str;

    /// Look a tag up by its wire form.
    fn from_tag(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

/// Implement `Deserialize` for entities by routing through [`Entity::from_value`],
/// so serde-driven decoding cannot skip validation.
macro_rules! deserialize_via_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                    <$ty as $crate::validate::Entity>::from_value(&value)
                        .map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

/// Implement [`Tag`], `Display` and string serde for a fieldless enum.
macro_rules! string_tag {
    ($ty:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        impl $crate::validate::Tag for $ty {
            const ALL: &'static [Self] = &[$($ty::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $tag),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::validate::Tag::as_str(self))
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::validate::Tag::as_str(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                <$ty as $crate::validate::Tag>::from_tag(&s)
                    .ok_or_else(|| serde::de::Error::custom(format!("unknown {}: '{s}'", stringify!($ty))))
            }
        }
    };
}

pub(crate) use deserialize_via_entity;
pub(crate) use string_tag;
