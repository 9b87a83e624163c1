//! # Anchor-Verify Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end flows and cross-library checks
//!     ├── engine.rs     # Engine laws and pinned vectors
//!     └── flows.rs      # Service flows through the gateway port
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p anchor-tests
//!
//! # By category
//! cargo test -p anchor-tests integration::
//! ```

#[cfg(test)]
pub mod integration;
