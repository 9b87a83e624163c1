//! # Byte Codec
//!
//! Named hex/base64 conversions used at every boundary of the engine.
//! Inputs arrive hex-encoded (public keys, digests) or base64-encoded
//! (signature blobs); all decode failures collapse into
//! `VerifyError::InvalidInputEncoding`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::errors::VerifyError;

/// Decode a hex string, tolerating an optional `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, VerifyError> {
    let stripped = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    hex::decode(stripped).map_err(|_| VerifyError::InvalidInputEncoding)
}

/// Decode a standard-alphabet base64 string.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, VerifyError> {
    BASE64
        .decode(input)
        .map_err(|_| VerifyError::InvalidInputEncoding)
}

/// Lowercase hex rendering.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Standard-alphabet base64 rendering.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}
