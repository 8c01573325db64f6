//! Hedera Consensus Service entities: topics and topic messages.

use serde::Serialize;
use serde_with::{base64::Base64, serde_as};

use crate::accounts::Key;
use crate::error::ValidationError;
use crate::types::{AccountId, ConsensusTimestamp, PublicKey, Timestamp, TopicId, TransactionId};
use crate::validate::{Entity, Fields, deserialize_via_entity, rules};

/// Largest payload carried by a single consensus message chunk.
pub const CHUNK_SIZE: usize = 1024;

/// Most chunks a single logical message may be split into.
pub const MAX_CHUNKS: u32 = 20;

/// Largest message accepted for submission.
pub const MAX_MESSAGE_BYTES: usize = CHUNK_SIZE * MAX_CHUNKS as usize;

/// Running hash versions the network has produced.
pub const RUNNING_HASH_VERSIONS: [u32; 2] = [2, 3];

fn optional_memo(f: &Fields<'_>) -> Result<Option<String>, ValidationError> {
    let memo = f.opt_string("memo")?;
    if let (Some(memo), true) = (&memo, f.is_strict()) {
        rules::memo("memo", memo)?;
    }
    Ok(memo)
}

// =============================================================================
// Topics
// =============================================================================

/// A consensus topic as served by the mirror node.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicInfo {
    pub topic_id: TopicId,
    pub memo: String,
    pub admin_key: Option<Key>,
    pub submit_key: Option<Key>,
    /// Number of messages the topic has received.
    pub sequence_number: u64,
    /// SHA-384 running hash, as reported (hex or base64).
    pub running_hash: String,
    pub auto_renew_account: Option<AccountId>,
    pub created_timestamp: Option<ConsensusTimestamp>,
}

impl TopicInfo {
    /// Whether anyone may submit messages to the topic.
    pub fn is_public(&self) -> bool {
        self.submit_key.is_none()
    }
}

impl Entity for TopicInfo {
    const SCHEMA: &'static str = "TopicInfo";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let topic_id = f.entity_id("topic_id")?;
        let memo = f.string("memo")?;
        rules::memo("memo", &memo)?;
        let admin_key = f.opt_entity("admin_key")?;
        let submit_key = f.opt_entity("submit_key")?;
        let sequence_number = f.u64("sequence_number")?;
        let running_hash = f.string("running_hash")?;
        rules::sha384_hash("running_hash", &running_hash)?;
        let auto_renew_account = f.opt_entity_id("auto_renew_account")?;
        let created_timestamp = f.opt_parse("created_timestamp")?;
        Ok(Self {
            topic_id,
            memo,
            admin_key,
            submit_key,
            sequence_number,
            running_hash,
            auto_renew_account,
            created_timestamp,
        })
    }
}

/// Request to create a topic. Every field is optional.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TopicCreate {
    pub memo: Option<String>,
    pub admin_key: Option<PublicKey>,
    pub submit_key: Option<PublicKey>,
    pub auto_renew_account: Option<AccountId>,
}

impl Entity for TopicCreate {
    const SCHEMA: &'static str = "TopicCreate";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let memo = optional_memo(f)?;
        let admin_key = f.opt_parse("admin_key")?;
        let submit_key = f.opt_parse("submit_key")?;
        let auto_renew_account = f.opt_entity_id("auto_renew_account")?;
        Ok(Self {
            memo,
            admin_key,
            submit_key,
            auto_renew_account,
        })
    }
}

/// Request to change a topic. Only the topic ID is required.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicUpdate {
    pub topic_id: TopicId,
    pub memo: Option<String>,
    pub admin_key: Option<PublicKey>,
    pub submit_key: Option<PublicKey>,
    pub expiration_time: Option<Timestamp>,
}

impl Entity for TopicUpdate {
    const SCHEMA: &'static str = "TopicUpdate";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let topic_id = f.entity_id("topic_id")?;
        let memo = optional_memo(f)?;
        let admin_key = f.opt_parse("admin_key")?;
        let submit_key = f.opt_parse("submit_key")?;
        let expiration_time = f.opt_parse("expiration_time")?;
        Ok(Self {
            topic_id,
            memo,
            admin_key,
            submit_key,
            expiration_time,
        })
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Position of one chunk within a chunked message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChunkInfo {
    /// Transaction that submitted the first chunk.
    pub initial_transaction_id: TransactionId,
    /// 1-based chunk index.
    pub number: u32,
    pub total: u32,
}

impl ChunkInfo {
    pub fn is_last(&self) -> bool {
        self.number == self.total
    }
}

impl Entity for ChunkInfo {
    const SCHEMA: &'static str = "ChunkInfo";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let initial_transaction_id = f.transaction_id("initial_transaction_id")?;
        let number = f.u32("number")?;
        rules::positive("number", number)?;
        let total = f.u32("total")?;
        rules::in_range("total", total, 1, MAX_CHUNKS)?;
        if number > total {
            return Err(ValidationError::range(
                "number",
                format!("chunk {number} exceeds total {total}"),
            ));
        }
        Ok(Self {
            initial_transaction_id,
            number,
            total,
        })
    }
}

/// A message as recorded on a topic.
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicMessage {
    pub topic_id: TopicId,
    pub consensus_timestamp: ConsensusTimestamp,
    /// 1-based position of the message on its topic.
    pub sequence_number: u64,
    /// Decoded message bytes; base64 on the wire.
    #[serde_as(as = "Base64")]
    pub message: Vec<u8>,
    pub running_hash: String,
    pub running_hash_version: u32,
    pub payer_account_id: AccountId,
    pub chunk_info: Option<ChunkInfo>,
}

impl TopicMessage {
    /// The message as UTF-8, when it is text.
    pub fn message_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.message).ok()
    }
}

impl Entity for TopicMessage {
    const SCHEMA: &'static str = "TopicMessage";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let topic_id = f.entity_id("topic_id")?;
        let consensus_timestamp = f.parse("consensus_timestamp")?;
        let sequence_number = f.u64("sequence_number")?;
        rules::positive("sequence_number", sequence_number)?;
        let message = rules::base64_bytes("message", f.str("message")?)?;
        let running_hash = f.string("running_hash")?;
        rules::sha384_hash("running_hash", &running_hash)?;
        let running_hash_version = f.u32("running_hash_version")?;
        if !RUNNING_HASH_VERSIONS.contains(&running_hash_version) {
            return Err(ValidationError::range(
                "running_hash_version",
                format!("must be 2 or 3, got {running_hash_version}"),
            ));
        }
        let payer_account_id = f.entity_id("payer_account_id")?;
        let chunk_info = f.opt_entity("chunk_info")?;
        Ok(Self {
            topic_id,
            consensus_timestamp,
            sequence_number,
            message,
            running_hash,
            running_hash_version,
            payer_account_id,
            chunk_info,
        })
    }
}

/// Request to submit a message to a topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicMessageSubmit {
    pub topic_id: TopicId,
    pub message: String,
}

impl TopicMessageSubmit {
    /// Number of chunks the message will be split into.
    pub fn chunk_count(&self) -> usize {
        self.message.len().div_ceil(CHUNK_SIZE)
    }
}

impl Entity for TopicMessageSubmit {
    const SCHEMA: &'static str = "TopicMessageSubmit";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let topic_id = f.entity_id("topic_id")?;
        let message = f.string("message")?;
        rules::non_empty("message", &message)?;
        rules::max_len("message", &message, MAX_MESSAGE_BYTES)?;
        Ok(Self { topic_id, message })
    }
}

deserialize_via_entity!(
    TopicInfo,
    TopicCreate,
    TopicUpdate,
    ChunkInfo,
    TopicMessage,
    TopicMessageSubmit,
);
