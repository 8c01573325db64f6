//! Core ledger primitives for Hedera.
//!
//! These are the validated building blocks that entity fields are made of.
//! Each one parses from its textual form with [`FromStr`](std::str::FromStr)
//! and serializes back to the same form.

mod entity_id;
mod key;
mod multibase;
mod network;
mod timestamp;
mod transaction;
mod units;

pub use entity_id::{
    AccountId, ContractId, EntityId, FileId, NodeAccountId, ScheduleId, TokenId, TopicId,
};
pub use key::{KeyType, PublicKey};
pub use multibase::Multibase;
pub use network::Network;
pub use timestamp::{ConsensusTimestamp, Timestamp};
pub use transaction::TransactionId;
pub use units::{Hbar, IntoHbar};
