//! Hedera Token Service entities.
//!
//! Token metadata as served by the mirror node, and the request payloads for
//! creating, updating and moving fungible tokens and NFTs.
//!
//! ```
//! use hedera_kit::{Entity, TokenCreate, TokenType, SupplyType};
//! use serde_json::json;
//!
//! let req = TokenCreate::from_value(&json!({
//!     "name": "Example",
//!     "symbol": "EXM",
//!     "decimals": 2,
//!     "initial_supply": 10000,
//!     "treasury_account_id": "0.0.1001",
//!     "type": "FUNGIBLE_COMMON",
//!     "supply_type": "FINITE",
//!     "max_supply": 1000000
//! }))
//! .unwrap();
//! assert_eq!(req.token_type, TokenType::FungibleCommon);
//! assert_eq!(req.supply_type, SupplyType::Finite);
//!
//! // Finite supply without a cap is refused
//! let err = TokenCreate::from_value(&json!({
//!     "name": "Example",
//!     "symbol": "EXM",
//!     "decimals": 2,
//!     "initial_supply": 0,
//!     "treasury_account_id": "0.0.1001",
//!     "type": "FUNGIBLE_COMMON",
//!     "supply_type": "FINITE"
//! }))
//! .unwrap_err();
//! assert_eq!(err.field(), "max_supply");
//! ```

mod nft;
mod requests;
mod types;

pub use nft::*;
pub use requests::*;
pub use types::*;
