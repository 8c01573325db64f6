//! Hedera DIDs and DID documents.
//!
//! A Hedera DID names a DID document anchored on a consensus topic:
//!
//! ```text
//! did:hedera:testnet:FVen3X669xLzsi6N2V91DoiyzHzg1uAgqiT8jZ9nS96Z_0.0.7000
//!            ^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ ^^^^^^^^
//!            network base58 of the 32-byte root key               topic
//! ```
//!
//! ```
//! use hedera_kit::{Did, Network};
//!
//! let did: Did = "did:hedera:testnet:FVen3X669xLzsi6N2V91DoiyzHzg1uAgqiT8jZ9nS96Z_0.0.7000"
//!     .parse()
//!     .unwrap();
//! assert_eq!(did.network(), Network::Testnet);
//! assert_eq!(did.topic_id().num, 7000);
//! assert!("did:web:example.com".parse::<Did>().is_err());
//! ```

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ParseDidError, ParseEntityIdError, ValidationError};
use crate::types::{Multibase, Network, PublicKey, TopicId};
use crate::validate::{Entity, Fields, deserialize_via_entity, rules};

/// Method prefix of every Hedera DID.
pub const DID_PREFIX: &str = "did:hedera:";

/// JSON-LD context every DID document must declare.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// The only verification method suite accepted.
pub const ED25519_VERIFICATION_KEY_2020: &str = "Ed25519VerificationKey2020";

/// Multicodec prefix of an ed25519 public key.
const ED25519_MULTICODEC: [u8; 2] = [0xed, 0x01];

// =============================================================================
// Did
// =============================================================================

/// A `did:hedera` identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Did {
    network: Network,
    id_string: String,
    key: [u8; 32],
    topic_id: TopicId,
}

impl Did {
    /// Build a DID from its parts.
    pub fn new(network: Network, key: [u8; 32], topic_id: TopicId) -> Self {
        Self {
            network,
            id_string: bs58::encode(key).into_string(),
            key,
            topic_id,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// The base58 key segment, as written in the DID.
    pub fn id_string(&self) -> &str {
        &self.id_string
    }

    /// The decoded 32-byte key segment.
    pub fn key_bytes(&self) -> &[u8; 32] {
        &self.key
    }

    /// Topic the DID document is anchored on.
    pub fn topic_id(&self) -> TopicId {
        self.topic_id
    }

    /// A DID URL naming `fragment` within this DID's document.
    pub fn with_fragment(&self, fragment: &str) -> String {
        format!("{self}#{fragment}")
    }
}

impl Did {
    /// Parse a DID, reading its topic ID with `parse_topic`.
    ///
    /// [`FromStr`] uses plain [`EntityId`](crate::EntityId) parsing; validation
    /// passes a context-aware parser so topic checksums are verified.
    pub fn parse_with<F>(s: &str, parse_topic: F) -> Result<Self, ParseDidError>
    where
        F: FnOnce(&str) -> Result<TopicId, ParseEntityIdError>,
    {
        let rest = s
            .strip_prefix(DID_PREFIX)
            .ok_or_else(|| ParseDidError::InvalidMethod(s.to_string()))?;
        let (network, id) = rest
            .split_once(':')
            .ok_or_else(|| ParseDidError::InvalidFormat(s.to_string()))?;
        let network: Network = network
            .parse()
            .map_err(ParseDidError::UnknownNetwork)?;
        let (id_string, topic) = id
            .rsplit_once('_')
            .ok_or_else(|| ParseDidError::InvalidFormat(s.to_string()))?;
        let key: [u8; 32] = bs58::decode(id_string)
            .into_vec()
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| ParseDidError::InvalidKey(id_string.to_string()))?;
        let topic_id = parse_topic(topic)?;
        Ok(Self {
            network,
            id_string: id_string.to_string(),
            key,
            topic_id,
        })
    }
}

impl FromStr for Did {
    type Err = ParseDidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, str::parse)
    }
}

impl Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{DID_PREFIX}{}:{}_{}",
            self.network, self.id_string, self.topic_id
        )
    }
}

impl Serialize for Did {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Check a `<did>#<fragment>` URL.
fn did_url(f: &Fields<'_>, field: &str, value: &str) -> Result<(), ValidationError> {
    let (did, fragment) = value
        .split_once('#')
        .ok_or_else(|| ValidationError::format(field, format!("'{value}' has no '#fragment'")))?;
    Did::parse_with(did, |topic| f.context().parse_entity_id(topic))
        .map_err(|e| ValidationError::format(field, e))?;
    rules::non_empty(field, fragment)
}

// =============================================================================
// Verification methods and services
// =============================================================================

/// An ed25519 key that can act for the DID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// `<did>#<fragment>`
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: String,
    pub controller: Did,
    pub public_key_multibase: Multibase,
    #[serde(skip)]
    public_key: PublicKey,
}

impl VerificationMethod {
    /// Describe `key` as a verification method controlled by `controller`.
    pub fn ed25519(controller: Did, fragment: &str, key: PublicKey) -> Result<Self, ValidationError> {
        let raw: [u8; 32] = key
            .as_bytes()
            .try_into()
            .map_err(|_| ValidationError::format("publicKeyMultibase", "key is not ed25519"))?;
        let mut bytes = ED25519_MULTICODEC.to_vec();
        bytes.extend_from_slice(&raw);
        Ok(Self {
            id: controller.with_fragment(fragment),
            method_type: ED25519_VERIFICATION_KEY_2020.to_string(),
            controller,
            public_key_multibase: Multibase::encode(&bytes),
            public_key: key,
        })
    }

    /// The decoded, curve-checked public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl Entity for VerificationMethod {
    const SCHEMA: &'static str = "VerificationMethod";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let id = f.string("id")?;
        did_url(f, "id", &id)?;
        let method_type = f.string("type")?;
        rules::equals("type", &method_type, ED25519_VERIFICATION_KEY_2020)?;
        let controller = f.did("controller")?;
        let public_key_multibase: Multibase = f.parse("publicKeyMultibase")?;
        let public_key = multicodec_ed25519(public_key_multibase.as_bytes())?;
        Ok(Self {
            id,
            method_type,
            controller,
            public_key_multibase,
            public_key,
        })
    }
}

fn multicodec_ed25519(bytes: &[u8]) -> Result<PublicKey, ValidationError> {
    const FIELD: &str = "publicKeyMultibase";
    let raw: [u8; 32] = bytes
        .strip_prefix(&ED25519_MULTICODEC[..])
        .and_then(|raw| raw.try_into().ok())
        .ok_or_else(|| {
            ValidationError::format(
                FIELD,
                format!("must decode to 0xed01 followed by 32 key bytes, got {} bytes", bytes.len()),
            )
        })?;
    PublicKey::ed25519_from_bytes(raw).map_err(|e| ValidationError::format(FIELD, e))
}

/// A service endpoint advertised by the DID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub service_endpoint: String,
}

impl Entity for Service {
    const SCHEMA: &'static str = "Service";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let id = f.string("id")?;
        did_url(f, "id", &id)?;
        let service_type = f.string("type")?;
        rules::non_empty("type", &service_type)?;
        let service_endpoint = f.string("serviceEndpoint")?;
        rules::url("serviceEndpoint", &service_endpoint)?;
        Ok(Self {
            id,
            service_type,
            service_endpoint,
        })
    }
}

// =============================================================================
// DidDocument
// =============================================================================

/// A resolved DID document.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub context: String,
    pub id: Did,
    pub controller: Option<Did>,
    pub verification_method: Vec<VerificationMethod>,
    /// IDs of verification methods usable for authentication.
    pub authentication: Option<Vec<String>>,
    /// IDs of verification methods usable for assertions.
    pub assertion_method: Option<Vec<String>>,
    pub service: Option<Vec<Service>>,
}

impl DidDocument {
    /// Find a verification method by its full ID.
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.iter().find(|m| m.id == id)
    }

    /// Verification methods listed for authentication.
    pub fn authentication_methods(&self) -> impl Iterator<Item = &VerificationMethod> {
        self.authentication
            .iter()
            .flatten()
            .filter_map(|id| self.verification_method(id))
    }

    /// Check that every reference in `refs` names a verification method of this document.
    fn check_refs(
        field: &str,
        refs: &[String],
        methods: &[VerificationMethod],
    ) -> Result<(), ValidationError> {
        for (i, r) in refs.iter().enumerate() {
            if !methods.iter().any(|m| &m.id == r) {
                return Err(ValidationError::format(
                    format!("{field}[{i}]"),
                    format!("'{r}' does not name a verification method in this document"),
                ));
            }
        }
        Ok(())
    }
}

impl Entity for DidDocument {
    const SCHEMA: &'static str = "DidDocument";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let context = f.string("@context")?;
        rules::equals("@context", &context, DID_CONTEXT)?;
        let id = f.did("id")?;
        let controller = f.opt_did("controller")?;
        let verification_method = f.entities("verificationMethod")?;
        rules::non_empty_list("verificationMethod", &verification_method)?;
        let authentication = f.opt_strings("authentication")?;
        if let Some(refs) = &authentication {
            Self::check_refs("authentication", refs, &verification_method)?;
        }
        let assertion_method = f.opt_strings("assertionMethod")?;
        if let Some(refs) = &assertion_method {
            Self::check_refs("assertionMethod", refs, &verification_method)?;
        }
        let service = f.opt_entities("service")?;
        Ok(Self {
            context,
            id,
            controller,
            verification_method,
            authentication,
            assertion_method,
            service,
        })
    }
}

deserialize_via_entity!(VerificationMethod, Service, DidDocument);
