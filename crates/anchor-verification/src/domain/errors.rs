//! # Verification Errors
//!
//! Error taxonomy for the verification engine. Every variant is terminal,
//! local, and non-retryable: a cryptographic failure is a definitive "no".

use thiserror::Error;

/// Errors that can occur while verifying an anchor signature.
///
/// A `VerifyError` never aborts the process; every failure path is folded
/// into a `VerificationResult { valid: false, reason: Some(..) }`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// Hex or base64 input could not be decoded
    #[error("Invalid input encoding")]
    InvalidInputEncoding,

    /// The signature blob matches no recognized layout (wrong length,
    /// unknown leading byte)
    #[error("Unsupported signature format")]
    UnsupportedSignatureFormat,

    /// Structurally invalid DER (tag mismatch, length mismatch,
    /// oversized component)
    #[error("Malformed DER signature")]
    MalformedSignature,

    /// Recovery header byte outside the recognized 27..=34 range
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery failed (zero or out-of-range scalar, r not a
    /// curve x-coordinate for the given recovery id, point at infinity)
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Off-curve or wrong-length public key bytes
    #[error("Invalid public key")]
    InvalidKey,

    /// Derived P2WPKH address differs from the expected address
    #[error("Address mismatch")]
    AddressMismatch,

    /// Caller-supplied expectations are mutually inconsistent, or
    /// insufficient for the detected signature form
    #[error("Inconsistent verification expectations")]
    InconsistentExpectations,

    /// The raw ECDSA check over the curve equation failed
    #[error("Signature verification failed")]
    SignatureInvalid,
}
