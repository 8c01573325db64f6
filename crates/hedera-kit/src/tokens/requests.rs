//! Token create, update and transfer requests.

use serde::Serialize;

use super::types::{SupplyType, TokenType, label, nft_decimals};
use crate::accounts::MAX_DECIMALS;
use crate::error::ValidationError;
use crate::types::{AccountId, PublicKey, Timestamp, TokenId};
use crate::validate::{Entity, Fields, deserialize_via_entity, rules};

// =============================================================================
// TokenCreate
// =============================================================================

/// Request to create a token.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenCreate {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub initial_supply: u64,
    pub treasury_account_id: AccountId,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub supply_type: SupplyType,
    /// Required and non-zero for `FINITE` supply.
    pub max_supply: Option<u64>,
    pub admin_key: Option<PublicKey>,
    pub supply_key: Option<PublicKey>,
    pub memo: Option<String>,
}

impl Entity for TokenCreate {
    const SCHEMA: &'static str = "TokenCreate";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let name = f.string("name")?;
        label("name", &name)?;
        let symbol = f.string("symbol")?;
        label("symbol", &symbol)?;
        let decimals = f.u32("decimals")?;
        rules::in_range("decimals", decimals, 0, MAX_DECIMALS)?;
        let initial_supply = f.amount("initial_supply")?;
        let treasury_account_id = f.entity_id("treasury_account_id")?;
        let token_type: TokenType = f.tag("type")?;
        nft_decimals(token_type, decimals)?;
        if token_type == TokenType::NonFungibleUnique && initial_supply != 0 {
            return Err(ValidationError::range(
                "initial_supply",
                format!("must be 0 for NON_FUNGIBLE_UNIQUE tokens, got {initial_supply}"),
            ));
        }
        let supply_type: SupplyType = f.tag("supply_type")?;
        let max_supply = f.opt_amount("max_supply")?;
        if supply_type == SupplyType::Finite {
            let cap = max_supply.ok_or_else(|| ValidationError::missing("max_supply"))?;
            rules::positive("max_supply", cap)?;
            if initial_supply > cap {
                return Err(ValidationError::range(
                    "initial_supply",
                    format!("{initial_supply} exceeds max supply {cap}"),
                ));
            }
        }
        let admin_key = f.opt_parse("admin_key")?;
        let supply_key = f.opt_parse("supply_key")?;
        let memo = f.opt_string("memo")?;
        if let (Some(memo), true) = (&memo, f.is_strict()) {
            rules::memo("memo", memo)?;
        }
        Ok(Self {
            name,
            symbol,
            decimals,
            initial_supply,
            treasury_account_id,
            token_type,
            supply_type,
            max_supply,
            admin_key,
            supply_key,
            memo,
        })
    }
}

// =============================================================================
// TokenUpdate
// =============================================================================

/// Request to change a token. Only the token ID is required.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenUpdate {
    pub token_id: TokenId,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub treasury_account_id: Option<AccountId>,
    pub admin_key: Option<PublicKey>,
    pub supply_key: Option<PublicKey>,
    pub memo: Option<String>,
    pub expiration_time: Option<Timestamp>,
}

impl Entity for TokenUpdate {
    const SCHEMA: &'static str = "TokenUpdate";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let token_id = f.entity_id("token_id")?;
        let name = f.opt_string("name")?;
        if let Some(name) = &name {
            label("name", name)?;
        }
        let symbol = f.opt_string("symbol")?;
        if let Some(symbol) = &symbol {
            label("symbol", symbol)?;
        }
        let treasury_account_id = f.opt_entity_id("treasury_account_id")?;
        let admin_key = f.opt_parse("admin_key")?;
        let supply_key = f.opt_parse("supply_key")?;
        let memo = f.opt_string("memo")?;
        if let (Some(memo), true) = (&memo, f.is_strict()) {
            rules::memo("memo", memo)?;
        }
        let expiration_time = f.opt_parse("expiration_time")?;
        Ok(Self {
            token_id,
            name,
            symbol,
            treasury_account_id,
            admin_key,
            supply_key,
            memo,
            expiration_time,
        })
    }
}

// =============================================================================
// TokenTransfer
// =============================================================================

/// Request to move fungible tokens between two accounts.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenTransfer {
    pub token_id: TokenId,
    pub from: AccountId,
    pub to: AccountId,
    /// Amount in the token's smallest unit, at least 1.
    pub amount: u64,
    pub memo: Option<String>,
}

impl Entity for TokenTransfer {
    const SCHEMA: &'static str = "TokenTransfer";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let token_id = f.entity_id("token_id")?;
        let from = f.entity_id("from")?;
        let to = f.entity_id("to")?;
        let amount = f.amount("amount")?;
        rules::positive("amount", amount)?;
        let memo = f.opt_string("memo")?;
        if let (Some(memo), true) = (&memo, f.is_strict()) {
            rules::memo("memo", memo)?;
        }
        Ok(Self {
            token_id,
            from,
            to,
            amount,
            memo,
        })
    }
}

deserialize_via_entity!(TokenCreate, TokenUpdate, TokenTransfer);
