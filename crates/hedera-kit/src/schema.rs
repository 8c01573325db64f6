//! Schema registration table.
//!
//! Maps schema names to entity validators, so a payload can be checked against
//! a schema chosen at runtime (for example from a message envelope). Each entity
//! is registered under its [`Entity::SCHEMA`] name and under the alias names
//! older producers use for it.
//!
//! ```
//! use hedera_kit::{ValidationContext, schema};
//! use serde_json::json;
//!
//! let ctx = ValidationContext::default();
//! let payload = json!({ "token_id": "0.0.1234", "balance": 0 });
//!
//! schema::validate("TokenBalance", &payload, &ctx).unwrap();
//! schema::validate("_Entity.TokenBalance", &payload, &ctx).unwrap();
//! assert!(schema::validate("NoSuchThing", &payload, &ctx).is_err());
//! ```

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::accounts::{
    AccountBalance, AccountCreate, AccountInfo, AccountUpdate, HbarTransfer, Key, TokenBalance,
};
use crate::did::{DidDocument, Service, VerificationMethod};
use crate::error::{Error, ValidationError};
use crate::hcs::{ChunkInfo, TopicCreate, TopicInfo, TopicMessage, TopicMessageSubmit, TopicUpdate};
use crate::nodes::{
    ExchangeRate, ExchangeRateSet, NetworkNode, NetworkStake, NetworkSupply, ServiceEndpoint,
};
use crate::proofs::{RecordFile, SignatureFile, StateProof};
use crate::tokens::{Nft, NftTransfer, TokenCreate, TokenInfo, TokenTransfer, TokenUpdate};
use crate::validate::{Entity, ValidationContext};

/// The entity family a schema belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Accounts,
    Tokens,
    Consensus,
    Did,
    Proofs,
    Nodes,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Accounts => "accounts",
            Family::Tokens => "tokens",
            Family::Consensus => "consensus",
            Family::Did => "did",
            Family::Proofs => "proofs",
            Family::Nodes => "nodes",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Validator = fn(&Value, &ValidationContext) -> Result<(), ValidationError>;

/// One row of the registration table.
#[derive(Clone, Copy)]
pub struct SchemaEntry {
    /// Name this row is looked up by.
    pub name: &'static str,
    pub family: Family,
    /// Schema name of the entity that validates this row.
    pub canonical: &'static str,
    validator: Validator,
}

impl SchemaEntry {
    /// Whether this row is an alias of another schema.
    pub fn is_alias(&self) -> bool {
        self.name != self.canonical
    }

    /// Run the entity validator on `value`, without logging.
    pub fn check(&self, value: &Value, ctx: &ValidationContext) -> Result<(), ValidationError> {
        (self.validator)(value, ctx)
    }
}

impl fmt::Debug for SchemaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaEntry")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("canonical", &self.canonical)
            .finish_non_exhaustive()
    }
}

fn check<T: Entity>(value: &Value, ctx: &ValidationContext) -> Result<(), ValidationError> {
    T::from_value_in(value, ctx).map(|_| ())
}

const fn entry<T: Entity>(family: Family) -> SchemaEntry {
    alias::<T>(T::SCHEMA, family)
}

const fn alias<T: Entity>(name: &'static str, family: Family) -> SchemaEntry {
    SchemaEntry {
        name,
        family,
        canonical: T::SCHEMA,
        validator: check::<T>,
    }
}

/// Registers each entity under its own name and under `_Entity.<name>`.
macro_rules! register {
    ($($family:ident => [$($ty:ident),+ $(,)?]),+ $(,)?) => {
        [
            $($(
                entry::<$ty>(Family::$family),
                alias::<$ty>(concat!("_Entity.", stringify!($ty)), Family::$family),
            )+)+
        ]
    };
}

static REGISTERED: [SchemaEntry; 62] = register! {
    Accounts => [
        TokenBalance, AccountBalance, Key, AccountInfo, AccountCreate, AccountUpdate, HbarTransfer,
    ],
    Tokens => [TokenInfo, TokenCreate, TokenUpdate, Nft, TokenTransfer, NftTransfer],
    Consensus => [
        TopicInfo, ChunkInfo, TopicMessage, TopicCreate, TopicUpdate, TopicMessageSubmit,
    ],
    Did => [VerificationMethod, Service, DidDocument],
    Proofs => [RecordFile, SignatureFile, StateProof],
    Nodes => [
        ServiceEndpoint, NetworkNode, NetworkSupply, ExchangeRate, ExchangeRateSet, NetworkStake,
    ],
};

static LEDGER_ALIASES: [SchemaEntry; 6] = [
    alias::<TokenBalance>("Hashgraph.Ledger.TokenBalance", Family::Accounts),
    alias::<AccountBalance>("Hashgraph.Ledger.AccountBalance", Family::Accounts),
    alias::<AccountInfo>("Hashgraph.Ledger.AccountInfo", Family::Accounts),
    alias::<TokenInfo>("Hashgraph.Ledger.TokenInfo", Family::Tokens),
    alias::<TopicMessage>("Hashgraph.Consensus.TopicMessage", Family::Consensus),
    alias::<DidDocument>("Hashgraph.Did.DidDocument", Family::Did),
];

/// Every registered row, canonical names and aliases alike.
pub fn entries() -> impl Iterator<Item = &'static SchemaEntry> {
    REGISTERED.iter().chain(LEDGER_ALIASES.iter())
}

/// Find the row registered under `name`.
pub fn lookup(name: &str) -> Option<&'static SchemaEntry> {
    entries().find(|e| e.name == name)
}

/// Canonical rows of one family.
pub fn by_family(family: Family) -> impl Iterator<Item = &'static SchemaEntry> {
    entries().filter(move |e| e.family == family && !e.is_alias())
}

/// Validate `value` against the schema registered under `name`.
pub fn validate(name: &str, value: &Value, ctx: &ValidationContext) -> Result<(), Error> {
    let Some(entry) = lookup(name) else {
        warn!(schema = name, "Unknown schema");
        return Err(Error::UnknownSchema(name.to_string()));
    };
    match entry.check(value, ctx) {
        Ok(()) => {
            debug!(schema = entry.canonical, alias = entry.is_alias(), "Payload accepted");
            Ok(())
        }
        Err(e) => {
            warn!(
                schema = entry.canonical,
                path = %e.path(),
                error = %e,
                "Payload rejected"
            );
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use serde_json::json;

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for e in entries() {
            assert!(seen.insert(e.name), "duplicate schema name {}", e.name);
        }
    }

    #[test]
    fn test_aliases_point_at_registered_schemas() {
        for e in entries().filter(|e| e.is_alias()) {
            let canonical = lookup(e.canonical).unwrap();
            assert!(!canonical.is_alias());
            assert_eq!(canonical.family, e.family);
        }
    }

    #[test]
    fn test_lookup() {
        let e = lookup("_Entity.AccountBalance").unwrap();
        assert_eq!(e.canonical, "AccountBalance");
        assert_eq!(e.family, Family::Accounts);
        assert!(e.is_alias());
        assert!(!lookup("AccountBalance").unwrap().is_alias());
        assert!(lookup("accountbalance").is_none());
    }

    #[test]
    fn test_by_family() {
        let names: Vec<_> = by_family(Family::Proofs).map(|e| e.name).collect();
        assert_eq!(names, vec!["RecordFile", "SignatureFile", "StateProof"]);
        assert_eq!(by_family(Family::Did).count(), 3);
    }

    #[test]
    fn test_validate() {
        let ctx = ValidationContext::default();
        let good = json!({ "token_id": "0.0.1234", "balance": 0 });
        let bad = json!({ "token_id": "0.0.1234", "balance": -5 });

        assert!(validate("Hashgraph.Ledger.TokenBalance", &good, &ctx).is_ok());

        let err = validate("TokenBalance", &bad, &ctx).unwrap_err();
        assert_eq!(err.as_validation().unwrap().field(), "balance");

        assert!(matches!(
            validate("Nope", &good, &ctx),
            Err(Error::UnknownSchema(name)) if name == "Nope"
        ));
    }

    #[test]
    fn test_validate_uses_context() {
        let strict = ValidationContext::testnet().require_checksums(true).build();
        let value = json!({ "token_id": "0.0.1234", "balance": 0 });
        assert!(validate("TokenBalance", &value, &strict).is_err());

        let value = json!({ "token_id": "0.0.1234-yvvkf", "balance": 0 });
        assert!(validate("TokenBalance", &value, &strict).is_ok());
    }
}
