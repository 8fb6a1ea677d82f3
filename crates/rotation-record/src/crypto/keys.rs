//! Ed25519 key pair handling.
//!
//! Keys move across the API in the 64-byte representation used by the
//! ledger tooling: a 32-byte seed followed by the 32-byte public key.

use ed25519_dalek::{SigningKey, VerifyingKey, KEYPAIR_LENGTH, SECRET_KEY_LENGTH};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::crypto::random::random_bytes_with;
use crate::error::{RotationError, Result};

/// An Ed25519 key pair for signing operations.
///
/// `SigningKey` zeroizes its secret on drop.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Ed25519KeyPair {
    /// Generate a new key pair from the thread-local CSPRNG.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generate a new key pair from the given entropy source.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let seed: Zeroizing<[u8; SECRET_KEY_LENGTH]> = Zeroizing::new(random_bytes_with(rng)?);
        Ok(Self::from_seed(&seed))
    }

    /// Expand a 32-byte seed into a key pair.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Parse the 64-byte seed ‖ public representation.
    ///
    /// Fails if the trailing half is not the public key of the seed.
    pub fn from_keypair_bytes(bytes: &[u8; KEYPAIR_LENGTH]) -> Result<Self> {
        let signing_key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| RotationError::InvalidKey(format!("inconsistent key pair: {e}")))?;
        let verifying_key = signing_key.verifying_key();
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// Reconstruct a verifying key from raw bytes.
    pub fn verifying_key_from_bytes(bytes: &[u8; 32]) -> Result<VerifyingKey> {
        VerifyingKey::from_bytes(bytes)
            .map_err(|e| RotationError::InvalidKey(format!("invalid verifying key: {e}")))
    }

    /// Return a reference to the signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Return the verifying (public) key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Return the 32-byte seed.
    pub fn seed_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LENGTH]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// Return the verifying key bytes.
    pub fn verifying_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// Return the 64-byte seed ‖ public representation.
    pub fn keypair_bytes(&self) -> Zeroizing<[u8; KEYPAIR_LENGTH]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }
}
