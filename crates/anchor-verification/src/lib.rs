//! # Anchor Verification Engine
//!
//! Verifies that a physical-item anchor is bound to a Bitcoin key pair:
//! a secp256k1 signature over a canonically-hashed message is checked
//! against an expected public key and/or P2WPKH address.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): inbound API and outbound gateway traits
//! - **Service Layer** (`service.rs`): wires domain logic to ports
//!
//! ## Security Notes
//!
//! - Address equality is never treated as sufficient proof: the raw ECDSA
//!   check always runs, even after an address match.
//! - DER lengths are validated against the actual buffer before slicing;
//!   malformed encodings are rejected, never coerced.
//! - The engine is stateless; verifications run in parallel with no locks.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::address::{derive_p2wpkh, hash160};
pub use domain::codec::{decode_base64, decode_hex, encode_base64, encode_hex};
pub use domain::engine::{batch_verify, parse_signature, verify};
pub use domain::entities::{
    BatchVerificationResult, MessageInput, Network, PublicKey, VerificationRequest,
    VerificationResult,
};
pub use domain::errors::VerifyError;
pub use domain::hashing::{sha256d, signed_message_hash};
pub use domain::recovery::recover;
pub use domain::signature::SignatureForm;
pub use ports::inbound::AnchorVerificationApi;
pub use ports::outbound::{AnchorGateway, AnchorStoreError};
pub use service::{binding_message, AnchorVerification, AnchorVerificationService};
