//! Validation configuration.

use crate::error::ParseEntityIdError;
use crate::types::{EntityId, Network};

/// Settings that change how strictly entities are validated.
///
/// The default context knows no network, accepts identifiers with or without
/// a checksum (checking only its shape), and enforces every documented rule.
///
/// # Example
///
/// ```
/// use hedera_kit::ValidationContext;
///
/// // Verify HIP-15 checksums against testnet and insist on them
/// let ctx = ValidationContext::testnet().require_checksums(true).build();
/// assert!(ctx.parse_entity_id("0.0.123-esxsf").is_ok());
/// assert!(ctx.parse_entity_id("0.0.123").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationContext {
    network: Option<Network>,
    require_checksums: bool,
    strict: bool,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            network: None,
            require_checksums: false,
            strict: true,
        }
    }
}

impl ValidationContext {
    /// Start from the defaults.
    pub fn builder() -> ValidationContextBuilder {
        ValidationContextBuilder {
            ctx: Self::default(),
        }
    }

    /// Context bound to mainnet.
    pub fn mainnet() -> ValidationContextBuilder {
        Self::builder().network(Network::Mainnet)
    }

    /// Context bound to testnet.
    pub fn testnet() -> ValidationContextBuilder {
        Self::builder().network(Network::Testnet)
    }

    /// Context bound to previewnet.
    pub fn previewnet() -> ValidationContextBuilder {
        Self::builder().network(Network::Previewnet)
    }

    /// Context bound to a local node.
    pub fn local() -> ValidationContextBuilder {
        Self::builder().network(Network::Local)
    }

    /// The network checksums are verified against, if any.
    pub fn network(&self) -> Option<Network> {
        self.network
    }

    /// Whether identifiers without a checksum are rejected.
    pub fn requires_checksums(&self) -> bool {
        self.require_checksums
    }

    /// Whether optional-field rules are enforced.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parse an entity ID under this context's checksum policy.
    pub fn parse_entity_id(&self, s: &str) -> Result<EntityId, ParseEntityIdError> {
        match self.network {
            Some(network) => EntityId::parse_checked(s, network, self.require_checksums),
            None => {
                let (id, checksum) = EntityId::parse_with_checksum(s)?;
                if checksum.is_none() && self.require_checksums {
                    return Err(ParseEntityIdError::MissingChecksum(s.to_string()));
                }
                Ok(id)
            }
        }
    }
}

/// Builder for [`ValidationContext`].
#[derive(Clone, Debug)]
pub struct ValidationContextBuilder {
    ctx: ValidationContext,
}

impl ValidationContextBuilder {
    /// Verify entity-id checksums against `network`.
    pub fn network(mut self, network: Network) -> Self {
        self.ctx.network = Some(network);
        self
    }

    /// Reject entity IDs that carry no checksum.
    pub fn require_checksums(mut self, require: bool) -> Self {
        self.ctx.require_checksums = require;
        self
    }

    /// Enforce (the default) or skip optional-field format and length rules.
    pub fn strict(mut self, strict: bool) -> Self {
        self.ctx.strict = strict;
        self
    }

    /// Shorthand for `strict(false)`.
    pub fn lenient(self) -> Self {
        self.strict(false)
    }

    /// Finish building.
    pub fn build(self) -> ValidationContext {
        self.ctx
    }
}
