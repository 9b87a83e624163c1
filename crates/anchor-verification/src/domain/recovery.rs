//! # Public Key Recovery (secp256k1)
//!
//! Reconstructs the candidate public key from a message digest, raw (r, s)
//! components, and a recovery id.
//!
//! ## Security Notes
//!
//! - **Scalar Range Validation**: r and s must be in [1, n-1]
//! - **Constant-Time Operations**: range checks use the `subtle` crate
//! - Uses the k256 crate for the curve arithmetic

use anchor_types::Hash;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use super::entities::PublicKey;
use super::errors::VerifyError;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Recover the public key that produced `(r, s)` over `digest`.
///
/// # Errors
/// - `InvalidRecoveryId` when `recovery_id` is not in 0..=3
/// - `RecoveryFailed` when r or s is zero or out of range, when r is not a
///   valid curve x-coordinate for the given recovery id, or when the
///   recovered point is the point at infinity
pub fn recover(
    digest: &Hash,
    r: &[u8; 32],
    s: &[u8; 32],
    recovery_id: u8,
) -> Result<PublicKey, VerifyError> {
    if recovery_id > 3 {
        return Err(VerifyError::InvalidRecoveryId(recovery_id));
    }
    if !is_valid_scalar(r) || !is_valid_scalar(s) {
        return Err(VerifyError::RecoveryFailed);
    }

    let recid =
        RecoveryId::try_from(recovery_id).map_err(|_| VerifyError::InvalidRecoveryId(recovery_id))?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(r);
    sig_bytes[32..].copy_from_slice(s);

    let sig = match Signature::from_slice(&sig_bytes) {
        Ok(sig) => {
            sig_bytes.zeroize();
            sig
        }
        Err(_) => {
            sig_bytes.zeroize();
            return Err(VerifyError::RecoveryFailed);
        }
    };

    let recovered = VerifyingKey::recover_from_prehash(digest, &sig, recid)
        .map_err(|_| VerifyError::RecoveryFailed)?;

    Ok(PublicKey::from_verifying_key(&recovered))
}

/// Check that a scalar is in the valid range [1, n-1], in constant time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    // scalar < n without early returns
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);
    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((scalar[i] < SECP256K1_ORDER[i]) as u8);
        let byte_greater = Choice::from((scalar[i] > SECP256K1_ORDER[i]) as u8);
        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!is_zero & less).into()
}
