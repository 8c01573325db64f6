//! State proof payloads.
//!
//! A state proof bundles a record file, the signature files that consensus
//! nodes produced over it, and the address books that list those nodes' keys.
//! These entities check the shape of a proof. Verifying the signatures
//! themselves is left to the caller.

use serde::Serialize;
use serde_with::{base64::Base64, serde_as};
use sha2::{Digest, Sha384};

use crate::error::ValidationError;
use crate::types::NodeAccountId;
use crate::validate::{Entity, Fields, deserialize_via_entity, rules};

/// Record stream versions a state proof may carry.
pub const SUPPORTED_VERSIONS: [u32; 3] = [2, 5, 6];

/// A required base64 payload that must not decode to nothing.
fn payload(f: &Fields<'_>, name: &str) -> Result<Vec<u8>, ValidationError> {
    let encoded = f.str(name)?;
    rules::non_empty(name, encoded)?;
    rules::base64_bytes(name, encoded)
}

// =============================================================================
// Files
// =============================================================================

/// A record stream file.
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordFile {
    /// Raw file bytes; base64 on the wire.
    #[serde_as(as = "Base64")]
    pub contents: Vec<u8>,
    /// Expected SHA-384 of the contents, as hex.
    pub hash: Option<String>,
}

impl RecordFile {
    /// Hex SHA-384 of the file contents.
    pub fn sha384(&self) -> String {
        hex::encode(Sha384::digest(&self.contents))
    }

    /// Whether the contents hash to the declared `hash`. `None` when no hash was given.
    pub fn matches_hash(&self) -> Option<bool> {
        let expected = self.hash.as_deref()?;
        let expected = expected.strip_prefix("0x").unwrap_or(expected);
        Some(expected.eq_ignore_ascii_case(&self.sha384()))
    }
}

impl Entity for RecordFile {
    const SCHEMA: &'static str = "RecordFile";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let contents = payload(f, "contents")?;
        let hash = f.opt_string("hash")?;
        if let Some(hash) = &hash {
            rules::hex_bytes("hash", hash, Some(48))?;
        }
        Ok(Self { contents, hash })
    }
}

/// One consensus node's signature over a record file.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignatureFile {
    pub node_account_id: NodeAccountId,
    #[serde_as(as = "Base64")]
    pub contents: Vec<u8>,
}

impl Entity for SignatureFile {
    const SCHEMA: &'static str = "SignatureFile";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let node_account_id = f.entity_id("node_account_id")?;
        let contents = payload(f, "contents")?;
        Ok(Self {
            node_account_id,
            contents,
        })
    }
}

// =============================================================================
// StateProof
// =============================================================================

/// A complete state proof.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StateProof {
    pub version: u32,
    pub record_file: RecordFile,
    /// At most one signature file per node.
    pub signature_files: Vec<SignatureFile>,
    /// Serialized address books, oldest first.
    #[serde_as(as = "Vec<Base64>")]
    pub address_books: Vec<Vec<u8>>,
}

impl StateProof {
    /// Nodes that signed the record file.
    pub fn signers(&self) -> impl Iterator<Item = NodeAccountId> + '_ {
        self.signature_files.iter().map(|s| s.node_account_id)
    }
}

impl Entity for StateProof {
    const SCHEMA: &'static str = "StateProof";

    fn from_fields(f: &Fields<'_>) -> Result<Self, ValidationError> {
        let version = f.u32("version")?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ValidationError::range(
                "version",
                format!("must be one of 2, 5, 6, got {version}"),
            ));
        }
        let record_file = f.entity("record_file")?;
        let signature_files: Vec<SignatureFile> = f.entities("signature_files")?;
        rules::non_empty_list("signature_files", &signature_files)?;
        for (i, file) in signature_files.iter().enumerate() {
            if signature_files[..i]
                .iter()
                .any(|prev| prev.node_account_id == file.node_account_id)
            {
                return Err(ValidationError::nested(
                    format!("signature_files[{i}]"),
                    ValidationError::format(
                        "node_account_id",
                        format!("node {} signed more than once", file.node_account_id),
                    ),
                ));
            }
        }
        let address_books = f
            .strings("address_books")?
            .iter()
            .enumerate()
            .map(|(i, book)| rules::base64_bytes(&format!("address_books[{i}]"), book))
            .collect::<Result<Vec<_>, _>>()?;
        rules::non_empty_list("address_books", &address_books)?;
        Ok(Self {
            version,
            record_file,
            signature_files,
            address_books,
        })
    }
}

deserialize_via_entity!(RecordFile, SignatureFile, StateProof);
