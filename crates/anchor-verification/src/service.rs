//! # Anchor Verification Service
//!
//! Application service layer: implements the inbound `AnchorVerificationApi`
//! by delegating to the domain engine, and drives the two anchor flows the
//! engine serves:
//!
//! - **presented flow**: the scanned tag presents identifier, public key,
//!   and signature; the service rebuilds the canonical binding message and
//!   verifies.
//! - **document flow**: the anchor JSON is fetched through the outbound
//!   gateway and the signature is checked over the raw document bytes.
//!
//! A gateway failure is reported as-is and never conflated with an invalid
//! signature.

use anchor_types::Hash;
use tracing::{debug, warn};

use crate::domain::entities::{
    BatchVerificationResult, MessageInput, Network, PublicKey, VerificationRequest,
    VerificationResult,
};
use crate::domain::errors::VerifyError;
use crate::domain::{address, codec, engine, recovery};
use crate::ports::inbound::AnchorVerificationApi;
use crate::ports::outbound::{AnchorGateway, AnchorStoreError};

/// Outcome of an anchor flow: the cryptographic verdict plus the document
/// metadata the engine itself never examines.
#[derive(Clone, Debug)]
pub struct AnchorVerification {
    /// The identifier the flow was invoked for.
    pub identifier: String,
    /// The engine's verdict.
    pub result: VerificationResult,
    /// Whether the presented key equals the document's creator key
    /// (document flow only, and only when the document asserts one).
    pub creator_key_matches: Option<bool>,
    /// Pass-through display name.
    pub name: Option<String>,
    /// Pass-through media preview reference.
    pub image_preview: Option<String>,
    /// Pass-through follow-up URL.
    pub key_request_url: Option<String>,
}

/// Canonical binding message for the presented flow.
///
/// This is the exact string the tag's key signed at provisioning time, so
/// the layout is fixed.
pub fn binding_message(uid: &str, anchor_id: &str) -> String {
    format!("uid={uid}&anchor_id={anchor_id}")
}

/// Anchor verification service.
pub struct AnchorVerificationService<G: AnchorGateway> {
    gateway: G,
    network: Network,
}

impl<G: AnchorGateway> AnchorVerificationService<G> {
    /// Create a service with mainnet address derivation.
    pub fn new(gateway: G) -> Self {
        Self::with_network(gateway, Network::Mainnet)
    }

    /// Create a service deriving addresses for the given network.
    pub fn with_network(gateway: G, network: Network) -> Self {
        Self { gateway, network }
    }

    /// Verify a scanned tag: identifier, hex public key, base64 signature.
    ///
    /// Input decoding failures become an invalid verdict with
    /// `InvalidInputEncoding`, not a panic or a transport error.
    pub fn verify_presented(
        &self,
        uid: &str,
        anchor_id: &str,
        public_key_hex: &str,
        signature_b64: &str,
    ) -> VerificationResult {
        let message = binding_message(uid, anchor_id);
        debug!(%uid, %anchor_id, "verifying presented anchor signature");

        let (key, signature) = match self.decode_inputs(public_key_hex, signature_b64) {
            Ok(decoded) => decoded,
            Err(reason) => {
                warn!(%uid, %anchor_id, %reason, "rejecting undecodable input");
                return VerificationResult::invalid(reason);
            }
        };

        let request = VerificationRequest {
            expected_address: None,
            expected_key: Some(key),
            message: MessageInput::Raw(message.into_bytes()),
            signature,
            network: self.network,
        };

        let result = engine::verify(&request);
        debug!(%uid, %anchor_id, valid = result.valid, "presented verification finished");
        result
    }

    /// Verify a signature over a remote anchor document.
    ///
    /// The document is fetched once through the gateway; store failures
    /// propagate unchanged so the caller can distinguish "data unavailable"
    /// from a cryptographic verdict.
    ///
    /// # Errors
    /// `AnchorStoreError` when the document cannot be fetched.
    pub async fn verify_anchor_document(
        &self,
        identifier: &str,
        public_key_hex: &str,
        signature_b64: &str,
    ) -> Result<AnchorVerification, AnchorStoreError> {
        let record = self.gateway.fetch_anchor(identifier).await?;
        debug!(%identifier, bytes = record.raw.len(), "fetched anchor document");

        let result = match self.decode_inputs(public_key_hex, signature_b64) {
            Ok((key, signature)) => {
                let request = VerificationRequest {
                    expected_address: None,
                    expected_key: Some(key),
                    message: MessageInput::Raw(record.raw.clone()),
                    signature,
                    network: self.network,
                };
                engine::verify(&request)
            }
            Err(reason) => {
                warn!(%identifier, %reason, "rejecting undecodable input");
                VerificationResult::invalid(reason)
            }
        };

        let creator_key_matches = record
            .document
            .creator
            .as_ref()
            .map(|creator| keys_equal(&creator.public_key, public_key_hex));

        Ok(AnchorVerification {
            identifier: identifier.to_owned(),
            result,
            creator_key_matches,
            name: record.document.name,
            image_preview: record.document.image_preview,
            key_request_url: record.document.key_request_url,
        })
    }

    fn decode_inputs(
        &self,
        public_key_hex: &str,
        signature_b64: &str,
    ) -> Result<(PublicKey, Vec<u8>), VerifyError> {
        let key = PublicKey::from_sec1_bytes(&codec::decode_hex(public_key_hex)?)?;
        let signature = codec::decode_base64(signature_b64)?;
        Ok((key, signature))
    }
}

/// Compare two hex-encoded keys in their canonical compressed form, so a
/// compressed and an uncompressed rendering of the same point match.
fn keys_equal(a_hex: &str, b_hex: &str) -> bool {
    let parse = |hex: &str| -> Result<PublicKey, VerifyError> {
        PublicKey::from_sec1_bytes(&codec::decode_hex(hex)?)
    };
    match (parse(a_hex), parse(b_hex)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl<G: AnchorGateway> AnchorVerificationApi for AnchorVerificationService<G> {
    fn verify(&self, request: &VerificationRequest) -> VerificationResult {
        engine::verify(request)
    }

    fn recover_public_key(&self, digest: &Hash, blob: &[u8]) -> Result<PublicKey, VerifyError> {
        let form = engine::parse_signature(blob)?;
        let (r, s) = form.components();
        let recovery_id = form
            .recovery_id()
            .ok_or(VerifyError::UnsupportedSignatureFormat)?;
        recovery::recover(digest, r, s, recovery_id)
    }

    fn derive_address(&self, key: &PublicKey, network: Network) -> Result<String, VerifyError> {
        address::derive_p2wpkh(key, network)
    }

    fn batch_verify(&self, requests: &[VerificationRequest]) -> BatchVerificationResult {
        engine::batch_verify(requests)
    }
}
