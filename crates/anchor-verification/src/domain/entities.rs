//! # Domain Entities
//!
//! Core data structures for anchor signature verification. All entities are
//! value types with no shared mutable state; a `VerificationResult` is
//! created once per request and never mutated afterwards.

use anchor_types::Hash;
use k256::ecdsa::VerifyingKey;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

use super::errors::VerifyError;

/// Which bech32 human-readable part addresses are derived with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// Mainnet (`bc1q...`)
    #[default]
    Mainnet,
    /// Testnet (`tb1q...`)
    Testnet,
}

impl Network {
    pub(crate) fn hrp(self) -> bech32::Hrp {
        match self {
            Self::Mainnet => bech32::hrp::BC,
            Self::Testnet => bech32::hrp::TB,
        }
    }
}

/// A validated secp256k1 public key, held in canonical compressed form.
///
/// Construction from untrusted bytes goes through the curve library, so a
/// `PublicKey` always lies on the curve. Comparison is on the compressed
/// 33-byte encoding regardless of the form the key arrived in.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    #[serde_as(as = "Bytes")]
    bytes: [u8; 33],
}

impl PublicKey {
    /// Parse a compressed (33-byte) or uncompressed (65-byte) SEC1 key.
    ///
    /// Only the two plain SEC1 forms are admitted: prefix 0x02/0x03 at 33
    /// bytes or prefix 0x04 at 65 bytes. The compact (0x05) and hybrid
    /// (0x06/0x07) tags the curve library would also decode are rejected
    /// up front; nothing in the wild signs with them.
    ///
    /// # Errors
    /// `VerifyError::InvalidKey` for off-curve input or any other
    /// prefix/length pairing.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, VerifyError> {
        let well_formed = matches!(
            (bytes.first(), bytes.len()),
            (Some(&(0x02 | 0x03)), 33) | (Some(&0x04), 65)
        );
        if !well_formed {
            return Err(VerifyError::InvalidKey);
        }
        let key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| VerifyError::InvalidKey)?;
        Ok(Self::from_verifying_key(&key))
    }

    pub(crate) fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        Self { bytes }
    }

    pub(crate) fn to_verifying_key(&self) -> VerifyingKey {
        // Invariant: bytes were validated on construction.
        VerifyingKey::from_sec1_bytes(&self.bytes).expect("key validated at construction")
    }

    /// The canonical compressed encoding (prefix 0x02/0x03).
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.bytes
    }

    /// Hex rendering of the compressed encoding.
    pub fn to_hex(&self) -> String {
        super::codec::encode_hex(&self.bytes)
    }
}

/// The message side of a verification: raw bytes still to be hashed under
/// the signed-message convention, or a digest the caller computed already.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageInput {
    /// Raw payload; the engine applies the canonical double-hash.
    Raw(Vec<u8>),
    /// A pre-computed 32-byte digest, passed through unchanged.
    Digest(Hash),
}

/// Request to verify one anchor signature.
///
/// At least one of `expected_address` / `expected_key` must be supplied;
/// both may be, in which case they are cross-checked before any signature
/// work happens.
#[derive(Clone, Debug)]
pub struct VerificationRequest {
    /// Expected P2WPKH (bech32) address, if the caller has one.
    pub expected_address: Option<String>,
    /// Expected public key, if the caller has one.
    pub expected_key: Option<PublicKey>,
    /// The message the signature covers.
    pub message: MessageInput,
    /// The signature blob as received (already hex/base64-decoded).
    pub signature: Vec<u8>,
    /// Network the expected address belongs to.
    pub network: Network,
}

/// Result of one verification. Returned by value, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the signature is valid.
    pub valid: bool,
    /// The recovered public key, when the signature form carried a
    /// recovery id and recovery succeeded. Reported even on invalid
    /// verdicts as diagnostic detail.
    pub recovered_key: Option<PublicKey>,
    /// Why verification failed, when it did.
    pub reason: Option<VerifyError>,
}

impl VerificationResult {
    /// A valid verdict.
    pub fn valid(recovered_key: Option<PublicKey>) -> Self {
        Self {
            valid: true,
            recovered_key,
            reason: None,
        }
    }

    /// An invalid verdict with no recovered key.
    pub fn invalid(reason: VerifyError) -> Self {
        Self {
            valid: false,
            recovered_key: None,
            reason: Some(reason),
        }
    }

    /// An invalid verdict that still reports the key recovery produced.
    pub fn invalid_with_key(reason: VerifyError, recovered_key: PublicKey) -> Self {
        Self {
            valid: false,
            recovered_key: Some(recovered_key),
            reason: Some(reason),
        }
    }
}

/// Result of verifying a batch of independent requests in parallel.
#[derive(Clone, Debug)]
pub struct BatchVerificationResult {
    /// Individual results, in request order.
    pub results: Vec<VerificationResult>,
    /// Whether every verification passed.
    pub all_valid: bool,
    /// Count of valid signatures.
    pub valid_count: usize,
    /// Count of invalid signatures.
    pub invalid_count: usize,
}

impl BatchVerificationResult {
    /// Fold individual results into batch counters.
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        let invalid_count = results.len() - valid_count;
        let all_valid = invalid_count == 0;

        Self {
            results,
            all_valid,
            valid_count,
            invalid_count,
        }
    }
}
