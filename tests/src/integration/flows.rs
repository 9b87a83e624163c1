//! # Service Flow Tests
//!
//! Exercises the anchor verification service through its ports: the
//! presented-tag flow, the fetched-document flow, and the distinction
//! between "store unavailable" and "signature invalid".

use anchor_types::{AnchorDocument, AnchorRecord, Creator};
use anchor_verification::{
    binding_message, encode_base64, signed_message_hash, AnchorGateway, AnchorStoreError,
    AnchorVerificationApi, AnchorVerificationService, PublicKey, VerifyError,
};
use k256::ecdsa::SigningKey;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Gateway backed by a map, counting fetches to assert single-attempt
/// behavior.
struct MapGateway {
    records: HashMap<String, AnchorRecord>,
    fetches: AtomicUsize,
    unavailable: bool,
}

impl MapGateway {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            fetches: AtomicUsize::new(0),
            unavailable: false,
        }
    }

    fn with_record(mut self, identifier: &str, record: AnchorRecord) -> Self {
        self.records.insert(identifier.to_owned(), record);
        self
    }

    fn unavailable() -> Self {
        Self {
            records: HashMap::new(),
            fetches: AtomicUsize::new(0),
            unavailable: true,
        }
    }
}

#[async_trait::async_trait]
impl AnchorGateway for MapGateway {
    async fn fetch_anchor(&self, identifier: &str) -> Result<AnchorRecord, AnchorStoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(AnchorStoreError::Unavailable("timeout".into()));
        }
        self.records
            .get(identifier)
            .cloned()
            .ok_or(AnchorStoreError::NotFound)
    }
}

fn keypair() -> (SigningKey, PublicKey) {
    let signing = SigningKey::random(&mut rand::thread_rng());
    let public =
        PublicKey::from_sec1_bytes(signing.verifying_key().to_encoded_point(true).as_bytes())
            .unwrap();
    (signing, public)
}

fn sign_compact(signing: &SigningKey, message: &[u8]) -> Vec<u8> {
    let digest = signed_message_hash(message);
    let (sig, recid) = signing.sign_prehash_recoverable(&digest).unwrap();
    let mut blob = Vec::with_capacity(65);
    blob.push(31 + recid.to_byte());
    blob.extend_from_slice(&sig.to_bytes());
    blob
}

#[test]
fn presented_tag_round_trip() {
    let (signing, public) = keypair();
    let message = binding_message("04A1B2C3", "0001");
    let blob = sign_compact(&signing, message.as_bytes());

    let service = AnchorVerificationService::new(MapGateway::new());
    let result = service.verify_presented(
        "04A1B2C3",
        "0001",
        &public.to_hex(),
        &encode_base64(&blob),
    );

    assert!(result.valid);
    assert_eq!(result.recovered_key, Some(public));
}

#[test]
fn presented_tag_signed_for_another_anchor_fails() {
    let (signing, public) = keypair();
    let message = binding_message("04A1B2C3", "0001");
    let blob = sign_compact(&signing, message.as_bytes());

    let service = AnchorVerificationService::new(MapGateway::new());
    // Same uid, different anchor id: the binding message changes.
    let result = service.verify_presented(
        "04A1B2C3",
        "0002",
        &public.to_hex(),
        &encode_base64(&blob),
    );

    assert!(!result.valid);
    assert_eq!(result.reason, Some(VerifyError::SignatureInvalid));
}

#[tokio::test]
async fn document_flow_round_trip() {
    let (signing, public) = keypair();
    let raw = br#"{"anchor_hash":"aa55","name":"Digital Anchor #0007"}"#.to_vec();
    let blob = sign_compact(&signing, &raw);

    let record = AnchorRecord {
        raw: raw.clone(),
        document: AnchorDocument {
            creator: Some(Creator {
                public_key: public.to_hex(),
            }),
            name: Some("Digital Anchor #0007".into()),
            ..Default::default()
        },
    };

    let gateway = MapGateway::new().with_record("0007", record);
    let service = AnchorVerificationService::new(gateway);

    let outcome = service
        .verify_anchor_document("0007", &public.to_hex(), &encode_base64(&blob))
        .await
        .unwrap();

    assert!(outcome.result.valid);
    assert_eq!(outcome.creator_key_matches, Some(true));
    assert_eq!(outcome.identifier, "0007");
    assert_eq!(outcome.name.as_deref(), Some("Digital Anchor #0007"));
}

#[tokio::test]
async fn tampered_document_bytes_fail() {
    let (signing, public) = keypair();
    let raw = br#"{"anchor_hash":"aa55"}"#.to_vec();
    let blob = sign_compact(&signing, &raw);

    // One byte of the stored document differs from what was signed.
    let mut tampered = raw.clone();
    tampered[10] ^= 0x01;
    let record = AnchorRecord {
        raw: tampered,
        document: AnchorDocument::default(),
    };

    let gateway = MapGateway::new().with_record("0007", record);
    let service = AnchorVerificationService::new(gateway);

    let outcome = service
        .verify_anchor_document("0007", &public.to_hex(), &encode_base64(&blob))
        .await
        .unwrap();

    assert!(!outcome.result.valid);
}

#[tokio::test]
async fn store_failure_is_not_a_verdict() {
    let service = AnchorVerificationService::new(MapGateway::unavailable());

    let err = service
        .verify_anchor_document("0001", "02ff", "QUJD")
        .await
        .unwrap_err();

    assert!(matches!(err, AnchorStoreError::Unavailable(_)));
}

#[tokio::test]
async fn missing_record_is_not_found_after_one_fetch() {
    let gateway = std::sync::Arc::new(MapGateway::new());
    let service = AnchorVerificationService::new(gateway.clone());

    let err = service
        .verify_anchor_document("0001", "02ff", "QUJD")
        .await
        .unwrap_err();

    assert!(matches!(err, AnchorStoreError::NotFound));
    // No retry on a definitive miss.
    assert_eq!(gateway.fetches.load(Ordering::SeqCst), 1);
}

#[test]
fn api_trait_object_is_usable_concurrently() {
    let (signing, public) = keypair();
    let message = binding_message("04A1B2C3", "0001");
    let blob = sign_compact(&signing, message.as_bytes());

    let service: std::sync::Arc<dyn AnchorVerificationApi> =
        std::sync::Arc::new(AnchorVerificationService::new(MapGateway::new()));

    let digest = signed_message_hash(message.as_bytes());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            let blob = blob.clone();
            let public = public.clone();
            std::thread::spawn(move || {
                let recovered = service.recover_public_key(&digest, &blob).unwrap();
                assert_eq!(recovered, public);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
