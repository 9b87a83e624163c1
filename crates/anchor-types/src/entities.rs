//! # Core Domain Entities
//!
//! Defines the entities exchanged between the verification engine and its
//! collaborators: the remote anchor document, the signature sidecar record,
//! and primitive aliases.

use serde::{Deserialize, Serialize};

/// A 32-byte hash (double-SHA256 message digest).
pub type Hash = [u8; 32];

/// Key material asserted by the anchor document's creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Creator {
    /// Hex-encoded secp256k1 public key (compressed or uncompressed).
    pub public_key: String,
}

/// A remote anchor document: the off-chain JSON asserting provenance of a
/// physical item.
///
/// The engine consumes only the signature-related fields; everything else
/// is pass-through metadata for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnchorDocument {
    /// Hex-encoded pre-image hash, when the document carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_hash: Option<String>,

    /// The key pair the anchor claims to be bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,

    /// Display name. Never examined by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Media preview reference (e.g. `ar://...`). Never examined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_preview: Option<String>,

    /// Follow-up URL for requesting the high-quality key. Never examined.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "hq_key_request_url")]
    pub key_request_url: Option<String>,
}

/// A signature-bearing sidecar document accompanying an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Hex-encoded secp256k1 public key.
    pub public_key: String,
    /// Base64-encoded signature blob (compact, compact+recovery, or DER).
    pub signature: String,
    /// Expected P2WPKH address, when the sidecar asserts one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// An anchor document together with the exact bytes it was fetched as.
///
/// Signatures are made over the raw document bytes, so re-serializing the
/// parsed form is never acceptable for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRecord {
    /// The raw bytes of the fetched document.
    pub raw: Vec<u8>,
    /// The parsed document.
    pub document: AnchorDocument,
}
