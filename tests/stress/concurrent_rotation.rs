//! Stress test: independent rotations built from many threads at once
//! must all verify, and deterministic derivation must agree across threads.

use std::sync::Arc;
use std::thread;

use rotation_record::crypto::keys::Ed25519KeyPair;
use rotation_record::{DerivationMode, KeyRotationBuilder};

const ROOT: &str = "888888d027c59579fc47a6fc6c4a5c0409c7c39bc38a86cb5fc0069978493762";
const SUBCHAIN: &str = "8888886f7e0fb06e7d3ac8bc4c1e8b9e24e3c12f1ab2b24a1d6e3f0e0c8f5a9b";

#[test]
fn stress_concurrent_deterministic_rotations_agree() {
    let identity_key = Arc::new(*Ed25519KeyPair::from_seed(&[5u8; 32]).keypair_bytes());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let key = Arc::clone(&identity_key);
            thread::spawn(move || {
                (0..50)
                    .map(|_| {
                        let (record, _) =
                            KeyRotationBuilder::new(ROOT, SUBCHAIN).sign(&key).unwrap();
                        assert!(record.verify_embedded().is_ok());
                        *record.new_public_key()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let keys: Vec<[u8; 32]> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("thread should not panic"))
        .collect();
    assert_eq!(keys.len(), 400);
    assert!(keys.iter().all(|k| k == &keys[0]));
}

#[test]
fn stress_concurrent_random_rotations_unique() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                let identity_key = Ed25519KeyPair::generate().unwrap();
                (0..50)
                    .map(|_| {
                        let (record, _) = KeyRotationBuilder::new(ROOT, SUBCHAIN)
                            .derivation(DerivationMode::Random)
                            .sign(&identity_key.keypair_bytes())
                            .unwrap();
                        assert!(record.verify(identity_key.verifying_key()).is_ok());
                        *record.new_public_key()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut keys: Vec<[u8; 32]> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("thread should not panic"))
        .collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 400, "random derivation should never repeat");
}
