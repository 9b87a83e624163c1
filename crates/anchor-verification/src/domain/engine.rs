//! # Verification Engine
//!
//! Orchestrates hashing, parsing, recovery, address derivation, and the
//! final curve check into a single verdict. The engine is stateless: every
//! call is a pure function of its request, so any number of verifications
//! may run in parallel.
//!
//! ## Decision policy
//!
//! 1. Cross-check the caller's expectations before any signature work.
//! 2. Digest the message (or pass a caller-supplied digest through).
//! 3. Parse the signature blob.
//! 4. Recover the public key when the form carries a recovery id.
//! 5. Compare the derived P2WPKH address against the expected one.
//! 6. Always run the raw ECDSA check, even after an address match:
//!    address equality only proves the recovered key *would produce* that
//!    address, not that the signature satisfies the curve equation.

use anchor_types::Hash;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::Signature;

use super::address::derive_p2wpkh;
use super::entities::{
    BatchVerificationResult, MessageInput, PublicKey, VerificationRequest, VerificationResult,
};
use super::errors::VerifyError;
use super::recovery::recover;
use super::signature::{parse, SignatureForm};
use super::{hashing, signature};

/// Verify one request end to end.
pub fn verify(request: &VerificationRequest) -> VerificationResult {
    match run(request) {
        Ok(result) => result,
        Err(outcome) => outcome,
    }
}

/// Re-parse helper exposed for callers that only need classification.
pub fn parse_signature(blob: &[u8]) -> Result<SignatureForm, VerifyError> {
    signature::parse(blob)
}

/// Verify many independent requests in parallel.
///
/// Requests share no state, so they fan out across the rayon pool without
/// locking.
pub fn batch_verify(requests: &[VerificationRequest]) -> BatchVerificationResult {
    use rayon::prelude::*;

    let results: Vec<VerificationResult> = requests.par_iter().map(verify).collect();
    BatchVerificationResult::from_results(results)
}

fn run(request: &VerificationRequest) -> Result<VerificationResult, VerificationResult> {
    check_expectations(request)?;

    let digest = digest_of(&request.message);

    let form = parse(&request.signature).map_err(VerificationResult::invalid)?;
    let (r, s) = form.components();

    // Resolve the key the check runs against: recovered when the form
    // carries a recovery id, the caller's otherwise.
    let recovered = match form.recovery_id() {
        Some(recovery_id) => Some(
            recover(&digest, r, s, recovery_id).map_err(VerificationResult::invalid)?,
        ),
        None => None,
    };

    let key_in_use = match (&recovered, &request.expected_key) {
        (Some(recovered), Some(expected)) => {
            // A recovered key that differs from the expected one means the
            // signature was not produced by the expected key; verifying
            // against the recovered key alone would be tautological.
            if recovered != expected {
                return Err(VerificationResult::invalid_with_key(
                    VerifyError::SignatureInvalid,
                    recovered.clone(),
                ));
            }
            recovered.clone()
        }
        (Some(recovered), None) => recovered.clone(),
        (None, Some(expected)) => expected.clone(),
        (None, None) => {
            // No recovery id and no expected key: nothing to check against.
            return Err(VerificationResult::invalid(
                VerifyError::InconsistentExpectations,
            ));
        }
    };

    if let Some(expected_address) = &request.expected_address {
        let derived = derive_p2wpkh(&key_in_use, request.network)
            .map_err(|e| fail(e, recovered.clone()))?;
        if &derived != expected_address {
            return Err(fail(VerifyError::AddressMismatch, recovered.clone()));
        }
    }

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(r);
    sig_bytes[32..].copy_from_slice(s);
    let sig = Signature::from_slice(&sig_bytes)
        .map_err(|_| fail(VerifyError::SignatureInvalid, recovered.clone()))?;

    key_in_use
        .to_verifying_key()
        .verify_prehash(&digest, &sig)
        .map_err(|_| fail(VerifyError::SignatureInvalid, recovered.clone()))?;

    Ok(VerificationResult::valid(recovered))
}

/// Fail fast when both expectations are supplied but contradict each other,
/// or when neither is supplied at all.
fn check_expectations(request: &VerificationRequest) -> Result<(), VerificationResult> {
    match (&request.expected_address, &request.expected_key) {
        (Some(address), Some(key)) => {
            let derived = derive_p2wpkh(key, request.network)
                .map_err(VerificationResult::invalid)?;
            if &derived != address {
                return Err(VerificationResult::invalid(
                    VerifyError::InconsistentExpectations,
                ));
            }
            Ok(())
        }
        (None, None) => Err(VerificationResult::invalid(
            VerifyError::InconsistentExpectations,
        )),
        _ => Ok(()),
    }
}

fn digest_of(message: &MessageInput) -> Hash {
    match message {
        MessageInput::Raw(bytes) => hashing::signed_message_hash(bytes),
        MessageInput::Digest(digest) => *digest,
    }
}

fn fail(reason: VerifyError, recovered: Option<PublicKey>) -> VerificationResult {
    match recovered {
        Some(key) => VerificationResult::invalid_with_key(reason, key),
        None => VerificationResult::invalid(reason),
    }
}
