//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits for the dependencies the service needs. The only one is the
//! store anchor documents are fetched from; the fetch happens before the
//! engine runs, with a single attempt and no internal retry.

use anchor_types::AnchorRecord;
use thiserror::Error;

/// Error from the anchor store.
///
/// "Data unavailable" is deliberately distinct from any cryptographic
/// verdict: callers must be able to tell "signature is invalid" apart from
/// "verification could not be performed".
#[derive(Debug, Error)]
pub enum AnchorStoreError {
    /// No document exists for the identifier
    #[error("Anchor not found")]
    NotFound,

    /// The store could not be reached or returned a transport error
    #[error("Anchor store unavailable: {0}")]
    Unavailable(String),
}

/// Gateway to the remote anchor-document store.
#[async_trait::async_trait]
pub trait AnchorGateway: Send + Sync {
    /// Fetch the anchor document for an identifier, along with the raw
    /// bytes it was served as (signatures cover the raw bytes).
    ///
    /// # Errors
    /// * `AnchorStoreError::NotFound` - no document for this identifier
    /// * `AnchorStoreError::Unavailable` - transport failure or timeout
    async fn fetch_anchor(&self, identifier: &str) -> Result<AnchorRecord, AnchorStoreError>;
}

// Shared gateways are common; forward through `Arc` so a caller can keep a
// handle to the gateway it hands the service.
#[async_trait::async_trait]
impl<G: AnchorGateway + ?Sized> AnchorGateway for std::sync::Arc<G> {
    async fn fetch_anchor(&self, identifier: &str) -> Result<AnchorRecord, AnchorStoreError> {
        (**self).fetch_anchor(identifier).await
    }
}
