//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the verification engine.

use anchor_types::Hash;

use crate::domain::entities::{
    BatchVerificationResult, Network, PublicKey, VerificationRequest, VerificationResult,
};
use crate::domain::errors::VerifyError;

/// Primary anchor verification API.
///
/// Implementations must be thread-safe (`Send + Sync`); the engine behind
/// them holds no state across calls.
pub trait AnchorVerificationApi: Send + Sync {
    /// Verify one request end to end and return the verdict.
    fn verify(&self, request: &VerificationRequest) -> VerificationResult;

    /// Recover the public key from a compact-with-recovery signature blob
    /// over the given digest.
    ///
    /// # Errors
    /// Parser and recovery errors from the underlying domain operations;
    /// blobs without a recovery id cannot recover a key.
    fn recover_public_key(&self, digest: &Hash, blob: &[u8]) -> Result<PublicKey, VerifyError>;

    /// Derive the P2WPKH address for a key.
    fn derive_address(&self, key: &PublicKey, network: Network) -> Result<String, VerifyError>;

    /// Verify many independent requests in parallel.
    fn batch_verify(&self, requests: &[VerificationRequest]) -> BatchVerificationResult;
}
