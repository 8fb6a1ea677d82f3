//! Edge case tests: root chain validation, field shapes, explicit key
//! pass-through, and timestamp encoding limits.

use rotation_record::crypto::keys::Ed25519KeyPair;
use rotation_record::identity::block_signing::{AUTHORIZATION_TAG, FIELD_COUNT};
use rotation_record::{DerivationMode, KeyRotationBuilder, RotationError};

const ROOT: &str = "888888d027c59579fc47a6fc6c4a5c0409c7c39bc38a86cb5fc0069978493762";
const SUBCHAIN: &str = "opaque-destination";

fn identity() -> Ed25519KeyPair {
    Ed25519KeyPair::from_seed(&[21u8; 32])
}

// === Root chain validation ===

#[test]
fn edge_every_non_prefix_first_byte_rejected() {
    let key = identity().keypair_bytes();
    for b in [0x00u8, 0x87, 0x89, 0xff] {
        let root = format!("{b:02x}{}", &ROOT[2..]);
        assert!(matches!(
            KeyRotationBuilder::new(root, SUBCHAIN).sign(&key),
            Err(RotationError::InvalidRootChainId(_))
        ));
    }
}

#[test]
fn edge_prefix_only_root_rejected() {
    let key = identity().keypair_bytes();
    assert!(matches!(
        KeyRotationBuilder::new("888888", SUBCHAIN).sign(&key),
        Err(RotationError::InvalidRootChainId(_))
    ));
}

#[test]
fn edge_odd_length_hex_rejected() {
    let key = identity().keypair_bytes();
    let root = &ROOT[..63];
    assert!(matches!(
        KeyRotationBuilder::new(root, SUBCHAIN).sign(&key),
        Err(RotationError::InvalidHex(_))
    ));
}

// === Field shapes ===

#[test]
fn edge_field_shapes_hold_for_every_mode() {
    let key = identity().keypair_bytes();
    let explicit = *Ed25519KeyPair::from_seed(&[2u8; 32]).keypair_bytes();
    for mode in [
        DerivationMode::Deterministic,
        DerivationMode::Random,
        DerivationMode::explicit(explicit),
    ] {
        let (record, _) = KeyRotationBuilder::new(ROOT, SUBCHAIN)
            .derivation(mode)
            .sign(&key)
            .unwrap();
        let fields = record.field_list();
        assert_eq!(fields.len(), FIELD_COUNT);
        let lengths: Vec<usize> = fields.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![1, 21, 32, 32, 8, 33, 64]);
        assert_eq!(fields[5][0], AUTHORIZATION_TAG);
    }
}

#[test]
fn edge_destination_passed_through_verbatim() {
    let key = identity().keypair_bytes();
    let (record, _) = KeyRotationBuilder::new(ROOT, "  any string, unvalidated ")
        .sign(&key)
        .unwrap();
    assert_eq!(
        record.to_external_entry().chain_id,
        "  any string, unvalidated "
    );
}

// === Explicit pass-through ===

#[test]
fn edge_explicit_secret_is_first_half() {
    let key = identity().keypair_bytes();
    let supplied = *Ed25519KeyPair::from_seed(&[77u8; 32]).keypair_bytes();
    let (record, secret) = KeyRotationBuilder::new(ROOT, SUBCHAIN)
        .derivation(DerivationMode::explicit(supplied))
        .sign(&key)
        .unwrap();
    assert_eq!(&secret[..], &supplied[..32]);
    assert_eq!(&record.new_public_key()[..], &supplied[32..]);
    assert_eq!(&secret[..], &[77u8; 32]);
}

// === Timestamps ===

#[test]
fn edge_timestamp_extremes_encode_big_endian() {
    let key = identity().keypair_bytes();
    for ts in [0u64, u64::MAX] {
        let (record, _) = KeyRotationBuilder::new(ROOT, SUBCHAIN)
            .timestamp(ts)
            .sign(&key)
            .unwrap();
        assert_eq!(record.field_list()[4], ts.to_be_bytes().to_vec());
        assert!(record.verify_embedded().is_ok());
    }
}
