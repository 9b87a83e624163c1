//! # Ports Layer
//!
//! Trait definitions for the engine's boundaries: the inbound verification
//! API and the outbound anchor-document gateway.

pub mod inbound;
pub mod outbound;
