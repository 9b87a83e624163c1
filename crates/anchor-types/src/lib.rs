//! # Anchor Types Crate
//!
//! Shared domain entities for the anchor verification workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: types that cross crate boundaries are
//!   defined here, not re-declared per crate.
//! - **Pass-Through Metadata**: fields of an anchor document that the
//!   verification engine never examines (display name, media reference,
//!   key-request URL) are carried verbatim and never interpreted.

pub mod entities;

pub use entities::*;
