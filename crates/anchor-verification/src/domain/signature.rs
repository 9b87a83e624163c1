//! # Signature Parsing
//!
//! Classifies an opaque signature blob into one of three canonical layouts
//! and normalizes each to raw 32-byte (r, s) components:
//!
//! - 65 bytes, header in `27..=34`: compact with recovery id
//! - 64 bytes: raw `r || s`
//! - 65..=72 bytes starting `0x30`: ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }`
//!
//! Every embedded DER length is validated against the actual buffer before
//! slicing. The input is attacker-controlled; a length field is a claim,
//! not a fact.

use super::errors::VerifyError;

/// Maximum DER-encoded ECDSA signature length for secp256k1.
const MAX_DER_LEN: usize = 72;

/// A signature blob normalized into one of the canonical forms.
///
/// `r` and `s` are always exactly 32 bytes: DER integers are stripped of
/// their sign-disambiguation byte and left-zero-padded; anything that
/// cannot be represented that way is rejected rather than coerced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureForm {
    /// 65-byte compact signature carrying a recovery id (0..=3).
    CompactWithRecovery {
        recovery_id: u8,
        r: [u8; 32],
        s: [u8; 32],
    },
    /// 64-byte `r || s`, or a DER signature after normalization. Carries
    /// no recovery id, so the caller must already hold the public key.
    CompactRaw { r: [u8; 32], s: [u8; 32] },
}

impl SignatureForm {
    /// The raw (r, s) components regardless of form.
    pub fn components(&self) -> (&[u8; 32], &[u8; 32]) {
        match self {
            Self::CompactWithRecovery { r, s, .. } | Self::CompactRaw { r, s } => (r, s),
        }
    }

    /// The recovery id, when the form carries one.
    pub fn recovery_id(&self) -> Option<u8> {
        match self {
            Self::CompactWithRecovery { recovery_id, .. } => Some(*recovery_id),
            Self::CompactRaw { .. } => None,
        }
    }
}

/// Classify and normalize a signature blob.
///
/// Classification is by length and leading byte, in order: DER (0x30 at
/// 65..=72 bytes), compact-with-recovery (65 bytes, header 27..=34, both
/// the uncompressed 27..=30 and compressed 31..=34 ranges), raw 64-byte.
///
/// # Errors
/// - `InvalidRecoveryId` for a 65-byte blob with an unrecognized header
/// - `MalformedSignature` for structurally invalid DER
/// - `UnsupportedSignatureFormat` for anything else, including empty input
pub fn parse(blob: &[u8]) -> Result<SignatureForm, VerifyError> {
    match blob.len() {
        65 if blob[0] == 0x30 => parse_der(blob),
        65 => {
            let header = blob[0];
            if !(27..=34).contains(&header) {
                return Err(VerifyError::InvalidRecoveryId(header));
            }
            let mut r = [0u8; 32];
            let mut s = [0u8; 32];
            r.copy_from_slice(&blob[1..33]);
            s.copy_from_slice(&blob[33..65]);
            Ok(SignatureForm::CompactWithRecovery {
                recovery_id: (header - 27) % 4,
                r,
                s,
            })
        }
        64 => {
            let mut r = [0u8; 32];
            let mut s = [0u8; 32];
            r.copy_from_slice(&blob[..32]);
            s.copy_from_slice(&blob[32..]);
            Ok(SignatureForm::CompactRaw { r, s })
        }
        66..=MAX_DER_LEN if blob[0] == 0x30 => parse_der(blob),
        _ => Err(VerifyError::UnsupportedSignatureFormat),
    }
}

/// Parse a DER-encoded ECDSA signature into a normalized `CompactRaw`.
fn parse_der(der: &[u8]) -> Result<SignatureForm, VerifyError> {
    // 0x30 [total-length] 0x02 [r-length] [r] 0x02 [s-length] [s]
    if der.len() < 6 || der[0] != 0x30 {
        return Err(VerifyError::MalformedSignature);
    }

    let mut pos = 1;
    let (total_len, consumed) = parse_der_length(&der[pos..])?;
    pos += consumed;

    // The outer length must account for exactly the remaining bytes; a
    // mismatch means truncation or trailing data.
    if pos + total_len != der.len() {
        return Err(VerifyError::MalformedSignature);
    }

    let (r, next) = parse_der_integer(der, pos)?;
    let (s, end) = parse_der_integer(der, next)?;

    if end != der.len() {
        return Err(VerifyError::MalformedSignature);
    }

    Ok(SignatureForm::CompactRaw { r, s })
}

/// Parse one INTEGER field at `pos`, returning the normalized 32-byte
/// value and the position just past it.
fn parse_der_integer(der: &[u8], pos: usize) -> Result<([u8; 32], usize), VerifyError> {
    if pos >= der.len() || der[pos] != 0x02 {
        return Err(VerifyError::MalformedSignature);
    }
    let mut pos = pos + 1;

    let (len, consumed) = parse_der_length(&der[pos..])?;
    pos += consumed;

    // A component longer than 33 bytes (32 + one sign byte) can never be a
    // valid secp256k1 scalar.
    if len == 0 || len > 33 || pos + len > der.len() {
        return Err(VerifyError::MalformedSignature);
    }

    let mut bytes = &der[pos..pos + len];
    // Strip the sign-disambiguation byte used when the high bit is set.
    if bytes.len() == 33 {
        if bytes[0] != 0x00 {
            return Err(VerifyError::MalformedSignature);
        }
        bytes = &bytes[1..];
    }

    let mut value = [0u8; 32];
    value[32 - bytes.len()..].copy_from_slice(bytes);
    Ok((value, pos + len))
}

/// Parse a DER length field: short form for 0..=127, long form otherwise.
/// Non-canonical encodings (leading zero length bytes, long form where
/// short form would do) are rejected.
fn parse_der_length(bytes: &[u8]) -> Result<(usize, usize), VerifyError> {
    let first = *bytes.first().ok_or(VerifyError::MalformedSignature)?;

    if first & 0x80 == 0 {
        return Ok((usize::from(first), 1));
    }

    let len_bytes = usize::from(first & 0x7f);
    if len_bytes == 0 || len_bytes > 4 || bytes.len() < 1 + len_bytes {
        return Err(VerifyError::MalformedSignature);
    }
    if bytes[1] == 0 {
        return Err(VerifyError::MalformedSignature);
    }

    let mut length = 0usize;
    for &b in &bytes[1..=len_bytes] {
        length = (length << 8) | usize::from(b);
    }
    if len_bytes == 1 && length <= 127 {
        return Err(VerifyError::MalformedSignature);
    }
    Ok((length, 1 + len_bytes))
}
