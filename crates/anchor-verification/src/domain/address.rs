//! # P2WPKH Address Derivation
//!
//! Derives a segwit v0 (bech32) address from a public key:
//! `bech32(hrp, 0, RIPEMD160(SHA256(compressed_key)))`.
//!
//! Derivation always uses the compressed key form; an uncompressed key is
//! converted first, matching how wallets derive bc1q addresses.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use super::entities::{Network, PublicKey};
use super::errors::VerifyError;

/// RIPEMD160(SHA256(data)), the Bitcoin key-hash primitive.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// Derive the P2WPKH address for a key on the given network.
pub fn derive_p2wpkh(key: &PublicKey, network: Network) -> Result<String, VerifyError> {
    let program = hash160(key.as_bytes());
    bech32::segwit::encode_v0(network.hrp(), &program).map_err(|_| VerifyError::InvalidKey)
}
