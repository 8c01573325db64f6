//! Validated data models for Hedera Hashgraph.
//!
//! **hedera-kit** defines the ledger entities an SDK exchanges with the
//! network and the mirror node (accounts, tokens, consensus topics, DIDs,
//! state proofs and network metrics) as plain Rust values that can only be
//! built from valid input.
//!
//! # Quick Start
//!
//! ```
//! use hedera_kit::*;
//! use serde_json::json;
//!
//! let balance = AccountBalance::from_value(&json!({
//!     "account": "0.0.1001",
//!     "balance": 100,
//!     "tokens": [{ "token_id": "0.0.1234", "balance": 0 }]
//! }))?;
//! assert_eq!(balance.tokens[0].token_id, TokenId::from_num(1234));
//! # Ok::<(), ValidationError>(())
//! ```
//!
//! # Design Principles
//!
//! 1. **Valid or absent**: construction returns `Result`; a value you hold has passed every rule
//! 2. **Fail fast**: the first violated rule is reported, in field order
//! 3. **Precise errors**: nested failures carry their path, like `tokens[0].token_id`
//! 4. **Explicit units**: amounts need units (`"5 hbar"`, `"100 tinybar"`) when written as text
//! 5. **No I/O**: entities are passive data; nothing here talks to the network
//!
//! # Core Types
//!
//! - [`EntityId`] - `shard.realm.num` identifier with HIP-15 checksums
//! - [`Hbar`] - Hbar amount with tinybar precision
//! - [`PublicKey`] - Curve-checked ED25519 or ECDSA secp256k1 key
//! - [`Timestamp`], [`ConsensusTimestamp`] - ISO-8601 and `seconds.nanos` instants
//! - [`TransactionId`] - Payer account plus valid-start time
//! - [`Did`] - `did:hedera` identifier
//!
//! # Network-Aware Validation
//!
//! ```
//! use hedera_kit::*;
//! use serde_json::json;
//!
//! let ctx = ValidationContext::testnet().require_checksums(true).build();
//! let value = json!({ "token_id": "0.0.1234-yvvkf", "balance": 10 });
//! assert!(TokenBalance::from_value_in(&value, &ctx).is_ok());
//!
//! let value = json!({ "token_id": "0.0.1234-pikcw", "balance": 10 });
//! assert!(TokenBalance::from_value_in(&value, &ctx).is_err());
//! ```

pub mod accounts;
pub mod decode;
pub mod did;
pub mod error;
pub mod hcs;
pub mod nodes;
pub mod proofs;
pub mod schema;
pub mod tokens;
pub mod types;
pub mod validate;

// Re-export commonly used types at crate root
pub use error::{Error, ValidationError, ValidationErrorKind};
pub use types::*;

pub use validate::{Entity, Fields, Tag, ValidationContext, ValidationContextBuilder};

pub use accounts::{
    AccountBalance, AccountCreate, AccountInfo, AccountUpdate, HbarTransfer, Key, KeyKind,
    TokenBalance,
};
pub use did::{Did, DidDocument, Service, VerificationMethod};
pub use hcs::{ChunkInfo, TopicCreate, TopicInfo, TopicMessage, TopicMessageSubmit, TopicUpdate};
pub use nodes::{
    ExchangeRate, ExchangeRateSet, NetworkNode, NetworkStake, NetworkSupply, ServiceEndpoint,
};
pub use proofs::{RecordFile, SignatureFile, StateProof};
pub use tokens::{
    Nft, NftTransfer, SupplyType, TokenCreate, TokenInfo, TokenTransfer, TokenType, TokenUpdate,
};

/// Everything needed to decode and inspect entities.
pub mod prelude {
    pub use crate::error::{Error, ValidationError, ValidationErrorKind};
    pub use crate::types::{AccountId, EntityId, Hbar, Network, PublicKey, TokenId, TopicId};
    pub use crate::validate::{Entity, ValidationContext};
}
