//! Token metadata.

use serde::Serialize;

use crate::accounts::MAX_DECIMALS;
use crate::error::ValidationError;
use crate::types::{AccountId, ConsensusTimestamp, TokenId};
use crate::validate::{Entity, Fields, deserialize_via_entity, rules, string_tag};

/// Longest token name or symbol, in bytes.
pub const MAX_NAME_BYTES: usize = 100;

// =============================================================================
// Tags
// =============================================================================

/// Whether a token is fungible or an NFT collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    FungibleCommon,
    NonFungibleUnique,
}

string_tag!(TokenType {
    FungibleCommon => "FUNGIBLE_COMMON",
    NonFungibleUnique => "NON_FUNGIBLE_UNIQUE",
});

impl TokenType {
    pub fn is_fungible(&self) -> bool {
        matches!(self, TokenType::FungibleCommon)
    }
}

/// Whether a token's supply is capped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SupplyType {
    Infinite,
    Finite,
}

string_tag!(SupplyType {
    Infinite => "INFINITE",
    Finite => "FINITE",
});

/// Name and symbol share the same shape rule.
pub(crate) fn label(field: &str, value: &str) -> Result<(), ValidationError> {
    rules::non_empty(field, value)?;
    rules::max_len(field, value, MAX_NAME_BYTES)
}

/// NFT collections carry no decimals.
pub(crate) fn nft_decimals(token_type: TokenType, decimals: u32) -> Result<(), ValidationError> {
    if token_type == TokenType::NonFungibleUnique && decimals != 0 {
        return Err(ValidationError::range(
            "decimals",
            format!("must be 0 for NON_FUNGIBLE_UNIQUE tokens, got {decimals}"),
        ));
    }
    Ok(())
}

// =============================================================================
// TokenInfo
// =============================================================================

/// Token metadata as served by the mirror node.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub token_id: TokenId,
    pub name: String,
    pub symbol: String,
    /// Decimal places for display; always 0 for NFTs.
    pub decimals: u32,
    /// Current supply in the smallest unit (or NFT count).
    pub total_supply: u64,
    pub treasury_account_id: AccountId,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub supply_type: SupplyType,
    /// Supply cap; meaningful only for `FINITE` tokens.
    pub max_supply: u64,
    pub deleted: bool,
    pub created_timestamp: Option<ConsensusTimestamp>,
    pub memo: Option<String>,
}

impl TokenInfo {
    /// Supply still mintable under the cap. `None` for infinite supply.
    pub fn remaining_supply(&self) -> Option<u64> {
        match self.supply_type {
            SupplyType::Finite => Some(self.max_supply.saturating_sub(self.total_supply)),
            SupplyType::Infinite => None,
        }
    }
}

impl Entity for TokenInfo {
    const SCHEMA: &'static str = "TokenInfo";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let token_id = f.entity_id("token_id")?;
        let name = f.string("name")?;
        label("name", &name)?;
        let symbol = f.string("symbol")?;
        label("symbol", &symbol)?;
        let decimals = f.u32("decimals")?;
        rules::in_range("decimals", decimals, 0, MAX_DECIMALS)?;
        let total_supply = f.amount("total_supply")?;
        let treasury_account_id = f.entity_id("treasury_account_id")?;
        let token_type: TokenType = f.tag("type")?;
        nft_decimals(token_type, decimals)?;
        let supply_type: SupplyType = f.tag("supply_type")?;
        let max_supply = f.amount("max_supply")?;
        if supply_type == SupplyType::Finite && total_supply > max_supply {
            return Err(ValidationError::range(
                "max_supply",
                format!("total supply {total_supply} exceeds max supply {max_supply}"),
            ));
        }
        let deleted = f.bool("deleted")?;
        let created_timestamp = f.opt_parse("created_timestamp")?;
        let memo = f.opt_string("memo")?;
        if let (Some(memo), true) = (&memo, f.is_strict()) {
            rules::memo("memo", memo)?;
        }
        Ok(Self {
            token_id,
            name,
            symbol,
            decimals,
            total_supply,
            treasury_account_id,
            token_type,
            supply_type,
            max_supply,
            deleted,
            created_timestamp,
            memo,
        })
    }
}

deserialize_via_entity!(TokenInfo);
