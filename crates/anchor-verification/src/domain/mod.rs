//! # Domain Layer
//!
//! Pure cryptographic logic, no I/O. Control flow through the layer:
//! hashing → signature parsing → (optional) key recovery → address
//! derivation → comparison → raw ECDSA check. The codec sits at every
//! boundary.

pub mod address;
pub mod codec;
pub mod engine;
pub mod entities;
pub mod errors;
pub mod hashing;
pub mod recovery;
pub mod signature;
