//! Account entities: balances, account info, and account requests.

use serde::{Serialize, Serializer};

use crate::error::ValidationError;
use crate::types::{AccountId, ConsensusTimestamp, Hbar, KeyType, PublicKey, Timestamp, TokenId};
use crate::validate::{Entity, Fields, Tag, deserialize_via_entity, rules, string_tag};

/// Largest value accepted for `max_automatic_token_associations`.
pub const MAX_AUTO_ASSOCIATIONS: i32 = 5000;

/// Largest decimals count a token may declare.
pub const MAX_DECIMALS: u32 = 18;

fn auto_associations(value: i32) -> Result<(), ValidationError> {
    rules::in_range(
        "max_automatic_token_associations",
        value,
        -1,
        MAX_AUTO_ASSOCIATIONS,
    )
}

// =============================================================================
// Balances
// =============================================================================

/// An account's balance of a single token.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenBalance {
    /// Token the balance is held in.
    pub token_id: TokenId,
    /// Balance in the token's smallest unit.
    pub balance: u64,
    /// Decimals of the token, when the source reports them.
    pub decimals: Option<u32>,
}

impl Entity for TokenBalance {
    const SCHEMA: &'static str = "TokenBalance";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let token_id = f.entity_id("token_id")?;
        let balance = f.u64("balance")?;
        let decimals = f.opt_u32("decimals")?;
        if let Some(d) = decimals {
            rules::in_range("decimals", d, 0, MAX_DECIMALS)?;
        }
        Ok(Self {
            token_id,
            balance,
            decimals,
        })
    }
}

/// An account's hbar balance and token balances at a point in time.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    /// The account.
    pub account: AccountId,
    /// Hbar balance, never negative.
    pub balance: Hbar,
    /// Consensus time the balance was taken at.
    pub timestamp: Option<ConsensusTimestamp>,
    /// Balances of associated tokens. May be empty.
    pub tokens: Vec<TokenBalance>,
}

impl AccountBalance {
    /// The balance held in `token_id`, if the account is associated with it.
    pub fn token(&self, token_id: TokenId) -> Option<&TokenBalance> {
        self.tokens.iter().find(|t| t.token_id == token_id)
    }
}

impl Entity for AccountBalance {
    const SCHEMA: &'static str = "AccountBalance";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let account = f.entity_id("account")?;
        let balance = f.hbar("balance")?;
        rules::non_negative("balance", balance)?;
        let timestamp = f.opt_parse("timestamp")?;
        let tokens = f.entities("tokens")?;
        Ok(Self {
            account,
            balance,
            timestamp,
            tokens,
        })
    }
}

// =============================================================================
// Keys
// =============================================================================

/// The `_type` tag of a mirror-node key object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Ed25519,
    EcdsaSecp256k1,
    ProtobufEncoded,
}

string_tag!(KeyKind {
    Ed25519 => "ED25519",
    EcdsaSecp256k1 => "ECDSA_SECP256K1",
    ProtobufEncoded => "ProtobufEncoded",
});

/// A key as reported by the mirror node: `{"_type": "...", "key": "<hex>"}`.
///
/// Simple keys are curve-checked. `ProtobufEncoded` keys (threshold and key
/// lists) are kept as opaque bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Ed25519(PublicKey),
    EcdsaSecp256k1(PublicKey),
    ProtobufEncoded(Vec<u8>),
}

impl Key {
    /// The `_type` tag of this key.
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Ed25519(_) => KeyKind::Ed25519,
            Key::EcdsaSecp256k1(_) => KeyKind::EcdsaSecp256k1,
            Key::ProtobufEncoded(_) => KeyKind::ProtobufEncoded,
        }
    }

    /// The public key, for simple keys.
    pub fn public_key(&self) -> Option<&PublicKey> {
        match self {
            Key::Ed25519(k) | Key::EcdsaSecp256k1(k) => Some(k),
            Key::ProtobufEncoded(_) => None,
        }
    }
}

impl Entity for Key {
    const SCHEMA: &'static str = "Key";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let kind: KeyKind = f.tag("_type")?;
        let raw = f.str("key")?;
        let simple = |key_type| {
            PublicKey::parse_as(key_type, raw).map_err(|e| ValidationError::format("key", e))
        };
        match kind {
            KeyKind::Ed25519 => simple(KeyType::Ed25519).map(Key::Ed25519),
            KeyKind::EcdsaSecp256k1 => simple(KeyType::EcdsaSecp256k1).map(Key::EcdsaSecp256k1),
            KeyKind::ProtobufEncoded => {
                rules::non_empty("key", raw)?;
                rules::hex_bytes("key", raw, None).map(Key::ProtobufEncoded)
            }
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            #[serde(rename = "_type")]
            key_type: &'a str,
            key: String,
        }

        let key = match self {
            Key::Ed25519(k) | Key::EcdsaSecp256k1(k) => k.to_string_raw(),
            Key::ProtobufEncoded(bytes) => hex::encode(bytes),
        };
        Repr {
            key_type: self.kind().as_str(),
            key,
        }
        .serialize(serializer)
    }
}

// =============================================================================
// Account Info
// =============================================================================

/// Full account details as served by the mirror node.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    pub account: AccountId,
    /// Alias the account was auto-created from, if any.
    pub alias: Option<String>,
    pub balance: AccountBalance,
    pub key: Option<Key>,
    pub deleted: bool,
    pub memo: String,
    pub evm_address: Option<String>,
    pub created_timestamp: Option<ConsensusTimestamp>,
    pub expiry_timestamp: Option<ConsensusTimestamp>,
    /// `-1` means unlimited.
    pub max_automatic_token_associations: i32,
    pub receiver_sig_required: bool,
}

impl Entity for AccountInfo {
    const SCHEMA: &'static str = "AccountInfo";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let account = f.entity_id("account")?;
        let alias = f.opt_string("alias")?;
        let balance = f.entity("balance")?;
        let key = f.opt_entity("key")?;
        let deleted = f.bool("deleted")?;
        let memo = f.string("memo")?;
        rules::memo("memo", &memo)?;
        let evm_address = f.opt_string("evm_address")?;
        if let Some(addr) = &evm_address {
            rules::evm_address("evm_address", addr)?;
        }
        let created_timestamp = f.opt_parse("created_timestamp")?;
        let expiry_timestamp = f.opt_parse("expiry_timestamp")?;
        let max_automatic_token_associations = f.i32("max_automatic_token_associations")?;
        auto_associations(max_automatic_token_associations)?;
        let receiver_sig_required = f.bool("receiver_sig_required")?;
        Ok(Self {
            account,
            alias,
            balance,
            key,
            deleted,
            memo,
            evm_address,
            created_timestamp,
            expiry_timestamp,
            max_automatic_token_associations,
            receiver_sig_required,
        })
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Request to create an account.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountCreate {
    pub key: PublicKey,
    pub initial_balance: Hbar,
    pub memo: Option<String>,
    pub max_automatic_token_associations: Option<i32>,
    pub receiver_sig_required: Option<bool>,
}

impl Entity for AccountCreate {
    const SCHEMA: &'static str = "AccountCreate";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let key = f.parse("key")?;
        let initial_balance = f.hbar("initial_balance")?;
        rules::non_negative("initial_balance", initial_balance)?;
        let memo = f.opt_string("memo")?;
        if let (Some(memo), true) = (&memo, f.is_strict()) {
            rules::memo("memo", memo)?;
        }
        let max_automatic_token_associations = f.opt_i32("max_automatic_token_associations")?;
        if let Some(n) = max_automatic_token_associations {
            auto_associations(n)?;
        }
        let receiver_sig_required = f.opt_bool("receiver_sig_required")?;
        Ok(Self {
            key,
            initial_balance,
            memo,
            max_automatic_token_associations,
            receiver_sig_required,
        })
    }
}

/// Request to change an account. Only the account ID is required.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountUpdate {
    pub account_id: AccountId,
    pub key: Option<PublicKey>,
    pub memo: Option<String>,
    pub max_automatic_token_associations: Option<i32>,
    pub receiver_sig_required: Option<bool>,
    pub expiration_time: Option<Timestamp>,
}

impl AccountUpdate {
    /// True when the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.key.is_none()
            && self.memo.is_none()
            && self.max_automatic_token_associations.is_none()
            && self.receiver_sig_required.is_none()
            && self.expiration_time.is_none()
    }
}

impl Entity for AccountUpdate {
    const SCHEMA: &'static str = "AccountUpdate";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let account_id = f.entity_id("account_id")?;
        let key = f.opt_parse("key")?;
        let memo = f.opt_string("memo")?;
        if let (Some(memo), true) = (&memo, f.is_strict()) {
            rules::memo("memo", memo)?;
        }
        let max_automatic_token_associations = f.opt_i32("max_automatic_token_associations")?;
        if let Some(n) = max_automatic_token_associations {
            auto_associations(n)?;
        }
        let receiver_sig_required = f.opt_bool("receiver_sig_required")?;
        let expiration_time = f.opt_parse("expiration_time")?;
        Ok(Self {
            account_id,
            key,
            memo,
            max_automatic_token_associations,
            receiver_sig_required,
            expiration_time,
        })
    }
}

/// Request to move hbar between two accounts.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HbarTransfer {
    pub from: AccountId,
    pub to: AccountId,
    /// Amount moved, strictly positive.
    pub amount: Hbar,
    pub memo: Option<String>,
}

impl Entity for HbarTransfer {
    const SCHEMA: &'static str = "HbarTransfer";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let from = f.entity_id("from")?;
        let to = f.entity_id("to")?;
        let amount = f.hbar("amount")?;
        rules::positive("amount", amount)?;
        let memo = f.opt_string("memo")?;
        if let (Some(memo), true) = (&memo, f.is_strict()) {
            rules::memo("memo", memo)?;
        }
        Ok(Self {
            from,
            to,
            amount,
            memo,
        })
    }
}

deserialize_via_entity!(
    TokenBalance,
    AccountBalance,
    Key,
    AccountInfo,
    AccountCreate,
    AccountUpdate,
    HbarTransfer,
);
