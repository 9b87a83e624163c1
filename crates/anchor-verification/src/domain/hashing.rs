//! # Message Hashing
//!
//! Canonical double-SHA256 of a payload under the Bitcoin "Signed Message"
//! convention: `prefix || varint(len) || message`, hashed twice.
//!
//! The length is encoded with the full Bitcoin variable-length integer
//! rule. Encoding it as a single byte unconditionally silently corrupts
//! hashes for payloads of 253 bytes or more (anchor documents routinely
//! exceed that), so that shortcut is not taken here.

use anchor_types::Hash;
use sha2::{Digest, Sha256};

/// Fixed 25-byte prefix: length byte 0x18 followed by the ASCII literal.
const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x18Bitcoin Signed Message:\n";

/// Double-SHA256 of arbitrary bytes.
pub fn sha256d(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    second.into()
}

/// Canonical signed-message digest of a raw payload.
pub fn signed_message_hash(message: &[u8]) -> Hash {
    let mut buf =
        Vec::with_capacity(SIGNED_MESSAGE_PREFIX.len() + 9 + message.len());
    buf.extend_from_slice(SIGNED_MESSAGE_PREFIX);
    encode_varint(message.len() as u64, &mut buf);
    buf.extend_from_slice(message);
    sha256d(&buf)
}

/// Bitcoin variable-length integer encoding.
fn encode_varint(value: u64, out: &mut Vec<u8>) {
    match value {
        0..=0xfc => out.push(value as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}
