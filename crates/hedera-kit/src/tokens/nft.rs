//! Non-fungible tokens.

use serde::Serialize;
use serde_with::{base64::Base64, serde_as};

use crate::error::ValidationError;
use crate::types::{AccountId, ConsensusTimestamp, TokenId};
use crate::validate::{Entity, Fields, deserialize_via_entity, rules};

/// Largest NFT metadata payload, in bytes.
pub const MAX_METADATA_BYTES: usize = 100;

fn serial_number(f: &Fields<'_>) -> Result<u64, ValidationError> {
    let serial = f.u64("serial_number")?;
    rules::positive("serial_number", serial)?;
    Ok(serial)
}

/// A single NFT, identified by its token and serial number.
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Nft {
    pub token_id: TokenId,
    /// Serial numbers start at 1.
    pub serial_number: u64,
    /// Current owner.
    pub account_id: AccountId,
    /// Decoded metadata bytes; base64 on the wire.
    #[serde_as(as = "Base64")]
    pub metadata: Vec<u8>,
    pub deleted: bool,
    pub created_timestamp: Option<ConsensusTimestamp>,
}

impl Nft {
    /// Metadata as UTF-8, when it is text (typically an IPFS URI).
    pub fn metadata_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.metadata).ok()
    }
}

impl Entity for Nft {
    const SCHEMA: &'static str = "Nft";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let token_id = f.entity_id("token_id")?;
        let serial_number = serial_number(f)?;
        let account_id = f.entity_id("account_id")?;
        let metadata = rules::base64_bytes("metadata", f.str("metadata")?)?;
        if f.is_strict() && metadata.len() > MAX_METADATA_BYTES {
            return Err(ValidationError::range(
                "metadata",
                format!("must be at most {MAX_METADATA_BYTES} bytes, got {}", metadata.len()),
            ));
        }
        let deleted = f.bool("deleted")?;
        let created_timestamp = f.opt_parse("created_timestamp")?;
        Ok(Self {
            token_id,
            serial_number,
            account_id,
            metadata,
            deleted,
            created_timestamp,
        })
    }
}

/// Request to move one NFT between two accounts.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftTransfer {
    pub token_id: TokenId,
    pub serial_number: u64,
    pub from: AccountId,
    pub to: AccountId,
    pub memo: Option<String>,
}

impl Entity for NftTransfer {
    const SCHEMA: &'static str = "NftTransfer";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let token_id = f.entity_id("token_id")?;
        let serial_number = serial_number(f)?;
        let from = f.entity_id("from")?;
        let to = f.entity_id("to")?;
        let memo = f.opt_string("memo")?;
        if let (Some(memo), true) = (&memo, f.is_strict()) {
            rules::memo("memo", memo)?;
        }
        Ok(Self {
            token_id,
            serial_number,
            from,
            to,
            memo,
        })
    }
}

deserialize_via_entity!(Nft, NftTransfer);
