//! Typed reads from an untrusted JSON object.

use std::fmt::Display;
use std::str::FromStr;

use serde_json::{Map, Value};

use super::{Entity, Tag, ValidationContext, rules};
use crate::error::ValidationError;
use crate::did::Did;
use crate::types::{EntityId, Hbar, TransactionId};

/// A JSON object being turned into an entity.
///
/// Every getter reports failures against the field it read, so an entity's
/// `from_fields` is a straight sequence of reads joined with `?`. Optional
/// getters treat an absent key and an explicit `null` the same way.
#[derive(Clone, Copy, Debug)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    ctx: &'a ValidationContext,
}

impl<'a> Fields<'a> {
    /// Wrap `value`, which must be a JSON object.
    pub fn new(value: &'a Value, ctx: &'a ValidationContext) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self { map, ctx }),
            other => Err(ValidationError::invalid_type("$", "object", json_type(other))),
        }
    }

    /// The context this input is validated under.
    pub fn context(&self) -> &'a ValidationContext {
        self.ctx
    }

    /// Whether optional-field rules are enforced.
    pub fn is_strict(&self) -> bool {
        self.ctx.is_strict()
    }

    /// Whether `name` is present and not `null`.
    pub fn has(&self, name: &str) -> bool {
        self.optional(name).is_some()
    }

    /// The raw value of a required field.
    pub fn required(&self, name: &str) -> Result<&'a Value, ValidationError> {
        self.optional(name)
            .ok_or_else(|| ValidationError::missing(name))
    }

    /// The raw value of an optional field.
    pub fn optional(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    // ========================================================================
    // Scalars
    // ========================================================================

    pub fn str(&self, name: &str) -> Result<&'a str, ValidationError> {
        as_str(name, self.required(name)?)
    }

    pub fn opt_str(&self, name: &str) -> Result<Option<&'a str>, ValidationError> {
        self.optional(name).map(|v| as_str(name, v)).transpose()
    }

    pub fn string(&self, name: &str) -> Result<String, ValidationError> {
        self.str(name).map(str::to_string)
    }

    pub fn opt_string(&self, name: &str) -> Result<Option<String>, ValidationError> {
        Ok(self.opt_str(name)?.map(str::to_string))
    }

    pub fn bool(&self, name: &str) -> Result<bool, ValidationError> {
        as_bool(name, self.required(name)?)
    }

    pub fn opt_bool(&self, name: &str) -> Result<Option<bool>, ValidationError> {
        self.optional(name).map(|v| as_bool(name, v)).transpose()
    }

    pub fn i64(&self, name: &str) -> Result<i64, ValidationError> {
        as_i64(name, self.required(name)?)
    }

    pub fn opt_i64(&self, name: &str) -> Result<Option<i64>, ValidationError> {
        self.optional(name).map(|v| as_i64(name, v)).transpose()
    }

    /// A non-negative integer. Negative values are out of range.
    pub fn u64(&self, name: &str) -> Result<u64, ValidationError> {
        as_u64(name, self.required(name)?)
    }

    pub fn opt_u64(&self, name: &str) -> Result<Option<u64>, ValidationError> {
        self.optional(name).map(|v| as_u64(name, v)).transpose()
    }

    /// A non-negative integer given either as a JSON integer or as a decimal
    /// string, the form the mirror node uses for supplies that may exceed
    /// JavaScript's safe integer range.
    pub fn amount(&self, name: &str) -> Result<u64, ValidationError> {
        match self.required(name)? {
            Value::String(s) => rules::decimal_u64(name, s),
            other => as_u64(name, other),
        }
    }

    pub fn opt_amount(&self, name: &str) -> Result<Option<u64>, ValidationError> {
        match self.optional(name) {
            Some(_) => self.amount(name).map(Some),
            None => Ok(None),
        }
    }

    pub fn u32(&self, name: &str) -> Result<u32, ValidationError> {
        narrow(name, self.u64(name)?)
    }

    pub fn opt_u32(&self, name: &str) -> Result<Option<u32>, ValidationError> {
        self.opt_u64(name)?.map(|n| narrow(name, n)).transpose()
    }

    pub fn i32(&self, name: &str) -> Result<i32, ValidationError> {
        narrow(name, self.i64(name)?)
    }

    pub fn opt_i32(&self, name: &str) -> Result<Option<i32>, ValidationError> {
        self.opt_i64(name)?.map(|n| narrow(name, n)).transpose()
    }

    // ========================================================================
    // Parsed strings
    // ========================================================================

    /// A string field parsed with `T`'s [`FromStr`]; parse errors become format errors.
    pub fn parse<T>(&self, name: &str) -> Result<T, ValidationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        parse_str(name, self.str(name)?)
    }

    pub fn opt_parse<T>(&self, name: &str) -> Result<Option<T>, ValidationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.opt_str(name)?.map(|s| parse_str(name, s)).transpose()
    }

    /// A `shard.realm.num` identifier, checked against the context's checksum policy.
    pub fn entity_id(&self, name: &str) -> Result<EntityId, ValidationError> {
        let s = self.str(name)?;
        self.ctx
            .parse_entity_id(s)
            .map_err(|e| ValidationError::format(name, e))
    }

    pub fn opt_entity_id(&self, name: &str) -> Result<Option<EntityId>, ValidationError> {
        match self.optional(name) {
            Some(_) => self.entity_id(name).map(Some),
            None => Ok(None),
        }
    }

    /// A transaction ID whose payer account follows the context's checksum policy.
    pub fn transaction_id(&self, name: &str) -> Result<TransactionId, ValidationError> {
        TransactionId::parse_with(self.str(name)?, |a| self.ctx.parse_entity_id(a))
            .map_err(|e| ValidationError::format(name, e))
    }

    /// A `did:hedera` identifier whose topic follows the context's checksum policy.
    pub fn did(&self, name: &str) -> Result<Did, ValidationError> {
        Did::parse_with(self.str(name)?, |t| self.ctx.parse_entity_id(t))
            .map_err(|e| ValidationError::format(name, e))
    }

    pub fn opt_did(&self, name: &str) -> Result<Option<Did>, ValidationError> {
        match self.optional(name) {
            Some(_) => self.did(name).map(Some),
            None => Ok(None),
        }
    }

    /// An hbar amount: an integer tinybar count, or a string with explicit units.
    pub fn hbar(&self, name: &str) -> Result<Hbar, ValidationError> {
        as_hbar(name, self.required(name)?)
    }

    pub fn opt_hbar(&self, name: &str) -> Result<Option<Hbar>, ValidationError> {
        self.optional(name).map(|v| as_hbar(name, v)).transpose()
    }

    /// A string that must be one of `T`'s tags.
    pub fn tag<T: Tag>(&self, name: &str) -> Result<T, ValidationError> {
        as_tag(name, self.str(name)?)
    }

    pub fn opt_tag<T: Tag>(&self, name: &str) -> Result<Option<T>, ValidationError> {
        self.opt_str(name)?.map(|s| as_tag(name, s)).transpose()
    }

    // ========================================================================
    // Nested entities and lists
    // ========================================================================

    /// A nested entity. Its failure is wrapped as an invalid-nested error on `name`.
    pub fn entity<T: Entity>(&self, name: &str) -> Result<T, ValidationError> {
        self.child(name, self.required(name)?)
    }

    pub fn opt_entity<T: Entity>(&self, name: &str) -> Result<Option<T>, ValidationError> {
        self.optional(name).map(|v| self.child(name, v)).transpose()
    }

    /// A list of nested entities. Item `i` reports failures under `name[i]`.
    pub fn entities<T: Entity>(&self, name: &str) -> Result<Vec<T>, ValidationError> {
        as_array(name, self.required(name)?)?
            .iter()
            .enumerate()
            .map(|(i, item)| self.child(&format!("{name}[{i}]"), item))
            .collect()
    }

    pub fn opt_entities<T: Entity>(&self, name: &str) -> Result<Option<Vec<T>>, ValidationError> {
        match self.optional(name) {
            Some(_) => self.entities(name).map(Some),
            None => Ok(None),
        }
    }

    /// A list of strings. Item `i` reports type failures under `name[i]`.
    pub fn strings(&self, name: &str) -> Result<Vec<String>, ValidationError> {
        as_array(name, self.required(name)?)?
            .iter()
            .enumerate()
            .map(|(i, item)| as_str(&format!("{name}[{i}]"), item).map(str::to_string))
            .collect()
    }

    pub fn opt_strings(&self, name: &str) -> Result<Option<Vec<String>>, ValidationError> {
        match self.optional(name) {
            Some(_) => self.strings(name).map(Some),
            None => Ok(None),
        }
    }

    fn child<T: Entity>(&self, name: &str, value: &'a Value) -> Result<T, ValidationError> {
        let Value::Object(map) = value else {
            return Err(ValidationError::invalid_type(name, "object", json_type(value)));
        };
        let fields = Fields { map, ctx: self.ctx };
        T::from_fields(&fields).map_err(|e| ValidationError::nested(name, e))
    }
}

/// The JSON type name of `value`, as used in invalid-type errors.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_str<'v>(name: &str, value: &'v Value) -> Result<&'v str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::invalid_type(name, "string", json_type(value)))
}

fn as_bool(name: &str, value: &Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::invalid_type(name, "boolean", json_type(value)))
}

fn as_array<'v>(name: &str, value: &'v Value) -> Result<&'v Vec<Value>, ValidationError> {
    value
        .as_array()
        .ok_or_else(|| ValidationError::invalid_type(name, "array", json_type(value)))
}

fn as_i64(name: &str, value: &Value) -> Result<i64, ValidationError> {
    let Value::Number(n) = value else {
        return Err(ValidationError::invalid_type(name, "integer", json_type(value)));
    };
    if n.is_f64() {
        return Err(ValidationError::invalid_type(name, "integer", "number"));
    }
    n.as_i64()
        .ok_or_else(|| ValidationError::range(name, format!("{n} does not fit in a signed 64-bit integer")))
}

fn as_u64(name: &str, value: &Value) -> Result<u64, ValidationError> {
    let Value::Number(n) = value else {
        return Err(ValidationError::invalid_type(name, "integer", json_type(value)));
    };
    if n.is_f64() {
        return Err(ValidationError::invalid_type(name, "integer", "number"));
    }
    match (n.as_u64(), n.as_i64()) {
        (Some(v), _) => Ok(v),
        (None, Some(v)) => Err(ValidationError::range(
            name,
            format!("must be non-negative, got {v}"),
        )),
        (None, None) => Err(ValidationError::range(name, format!("{n} is not representable"))),
    }
}

fn as_hbar(name: &str, value: &Value) -> Result<Hbar, ValidationError> {
    match value {
        Value::Number(_) => as_i64(name, value).map(Hbar::from_tinybars),
        Value::String(s) => parse_str(name, s),
        other => Err(ValidationError::invalid_type(name, "integer", json_type(other))),
    }
}

fn as_tag<T: Tag>(name: &str, s: &str) -> Result<T, ValidationError> {
    T::from_tag(s).ok_or_else(|| {
        let allowed: Vec<&str> = T::ALL.iter().map(Tag::as_str).collect();
        ValidationError::format(
            name,
            format!("must be one of {}, got '{s}'", allowed.join(", ")),
        )
    })
}

fn narrow<S, T>(name: &str, value: S) -> Result<T, ValidationError>
where
    S: Copy + Display,
    T: TryFrom<S>,
{
    T::try_from(value).map_err(|_| {
        ValidationError::range(name, format!("{value} does not fit in {}", std::any::type_name::<T>()))
    })
}

fn parse_str<T>(name: &str, s: &str) -> Result<T, ValidationError>
where
    T: FromStr,
    T::Err: Display,
{
    s.parse().map_err(|e| ValidationError::format(name, e))
}
