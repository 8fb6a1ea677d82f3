//! Ed25519 signing and verification.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

use crate::error::{RotationError, Result};

/// Sign a message with an Ed25519 signing key.
///
/// Returns the signature as 64 bytes.
pub fn sign(signing_key: &SigningKey, message: &[u8]) -> [u8; 64] {
    signing_key.sign(message).to_bytes()
}

/// Verify a raw 64-byte Ed25519 signature against a public key and message.
pub fn verify(verifying_key: &VerifyingKey, message: &[u8], signature: &[u8; 64]) -> Result<()> {
    let signature = Signature::from_bytes(signature);
    verifying_key
        .verify_strict(message, &signature)
        .map_err(|_| RotationError::SignatureInvalid)
}
