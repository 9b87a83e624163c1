//! # Integration Tests
//!
//! Cross-crate flows: the engine exercised through its public API, the
//! service exercised through the gateway port, and agreement with an
//! independent secp256k1 implementation.

pub mod flows;
