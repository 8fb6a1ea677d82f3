//! Block-signing key rotation records.
//!
//! A rotation record announces a new block-signing public key for an
//! identity. The identity's current key signs
//! `version ‖ message ‖ root chain ID ‖ new public key ‖ timestamp`,
//! and the record travels as seven separately delimited ext-ids of an
//! external ledger entry.

use ed25519_dalek::{VerifyingKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::crypto::keys::Ed25519KeyPair;
use crate::crypto::signing;
use crate::error::Result;

use super::chain_id::{RootChainId, CHAIN_ID_LENGTH};
use super::entry::ExternalEntry;

/// Record format version.
pub const RECORD_VERSION: u8 = 0x00;

/// Human-auditable tag carried in, and covered by, the signature.
pub const BLOCK_SIGNING_MESSAGE: &[u8] = b"New Block Signing Key";

/// Leading byte of the authorization preimage.
pub const AUTHORIZATION_TAG: u8 = 0x01;

/// Length of the authorization preimage: tag plus 32 key bytes.
pub const AUTHORIZATION_PREIMAGE_LENGTH: usize = 33;

/// Number of ext-ids a rotation record occupies.
pub const FIELD_COUNT: usize = 7;

/// How the new block-signing key pair is obtained.
#[derive(Default)]
pub enum DerivationMode {
    /// Derive from the root chain ID text; the same ID always yields the same key.
    #[default]
    Deterministic,
    /// Use a caller-generated key pair in the 64-byte seed ‖ public layout.
    ///
    /// The record takes bytes `32..64` as the new public key and the first
    /// 32 bytes come back as the secret. Every mode returns the seed half;
    /// none returns bytes `32..64` as the secret.
    Explicit(Zeroizing<[u8; KEYPAIR_LENGTH]>),
    /// Draw a fresh key pair from the entropy source.
    Random,
}

impl DerivationMode {
    /// Wrap a caller-supplied 64-byte key pair.
    pub fn explicit(keypair: [u8; KEYPAIR_LENGTH]) -> Self {
        Self::Explicit(Zeroizing::new(keypair))
    }

    /// Return a stable string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Deterministic => "deterministic",
            Self::Explicit(_) => "explicit",
            Self::Random => "random",
        }
    }
}

impl std::fmt::Debug for DerivationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public key and secret seed of the key being activated.
struct NewKey {
    public: [u8; PUBLIC_KEY_LENGTH],
    secret: Zeroizing<[u8; SECRET_KEY_LENGTH]>,
}

impl DerivationMode {
    fn acquire<R: RngCore + CryptoRng>(&self, root: &RootChainId, rng: &mut R) -> Result<NewKey> {
        let pair = match self {
            Self::Deterministic => Ed25519KeyPair::from_seed(&root.deterministic_seed()),
            Self::Random => Ed25519KeyPair::generate_with(rng)?,
            Self::Explicit(keypair) => {
                // Only the public half enters the record; the seed goes back as-is.
                let mut public = [0u8; PUBLIC_KEY_LENGTH];
                public.copy_from_slice(&keypair[SECRET_KEY_LENGTH..]);
                let mut secret = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
                secret.copy_from_slice(&keypair[..SECRET_KEY_LENGTH]);
                return Ok(NewKey { public, secret });
            }
        };
        Ok(NewKey {
            public: pair.verifying_key_bytes(),
            secret: pair.seed_bytes(),
        })
    }
}

/// Builder for block-signing key rotation records.
pub struct KeyRotationBuilder {
    root_chain_hex: String,
    destination_chain: String,
    derivation: DerivationMode,
    timestamp: Option<u64>,
}

impl KeyRotationBuilder {
    /// Start building a record for the given root chain, to be written
    /// to `destination_chain`.
    pub fn new(root_chain_hex: impl Into<String>, destination_chain: impl Into<String>) -> Self {
        Self {
            root_chain_hex: root_chain_hex.into(),
            destination_chain: destination_chain.into(),
            derivation: DerivationMode::default(),
            timestamp: None,
        }
    }

    /// Choose how the new key pair is obtained.
    pub fn derivation(mut self, mode: DerivationMode) -> Self {
        self.derivation = mode;
        self
    }

    /// Pin the record timestamp (seconds) instead of reading the clock.
    pub fn timestamp(mut self, secs: u64) -> Self {
        self.timestamp = Some(secs);
        self
    }

    /// Sign and finalize the record, drawing entropy from the thread RNG.
    pub fn sign(
        self,
        authorizing_key: &[u8; KEYPAIR_LENGTH],
    ) -> Result<(KeyRotationRecord, Zeroizing<[u8; SECRET_KEY_LENGTH]>)> {
        self.sign_with_rng(authorizing_key, &mut rand::thread_rng())
    }

    /// Sign and finalize the record.
    ///
    /// `authorizing_key` is the identity's current key in the 64-byte
    /// seed ‖ public layout. Returns the record and the new key's 32-byte
    /// secret seed, which the caller is responsible for storing.
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        self,
        authorizing_key: &[u8; KEYPAIR_LENGTH],
        rng: &mut R,
    ) -> Result<(KeyRotationRecord, Zeroizing<[u8; SECRET_KEY_LENGTH]>)> {
        let root_chain_id = RootChainId::from_hex(&self.root_chain_hex)?;
        let authorizer = Ed25519KeyPair::from_keypair_bytes(authorizing_key)?;
        let new_key = self.derivation.acquire(&root_chain_id, rng)?;
        let timestamp = self.timestamp.unwrap_or_else(crate::time::now_secs);

        let mut authorization_preimage = [0u8; AUTHORIZATION_PREIMAGE_LENGTH];
        authorization_preimage[0] = AUTHORIZATION_TAG;
        authorization_preimage[1..].copy_from_slice(&authorizing_key[SECRET_KEY_LENGTH..]);

        let preimage = signed_preimage(root_chain_id.as_bytes(), &new_key.public, timestamp);
        let signature = signing::sign(authorizer.signing_key(), &preimage);

        log::debug!(
            "built block-signing key rotation for {} ({} derivation, t={timestamp})",
            root_chain_id,
            self.derivation.as_str()
        );

        let record = KeyRotationRecord {
            root_chain_id,
            new_public_key: new_key.public,
            timestamp,
            authorization_preimage,
            signature,
            destination_chain: self.destination_chain,
        };
        Ok((record, new_key.secret))
    }
}

/// Concatenate the signed fields in wire order, with no delimiters.
fn signed_preimage(
    root_chain_id: &[u8; CHAIN_ID_LENGTH],
    new_public_key: &[u8; PUBLIC_KEY_LENGTH],
    timestamp: u64,
) -> Vec<u8> {
    let mut preimage = Vec::with_capacity(
        1 + BLOCK_SIGNING_MESSAGE.len() + CHAIN_ID_LENGTH + PUBLIC_KEY_LENGTH + 8,
    );
    preimage.push(RECORD_VERSION);
    preimage.extend_from_slice(BLOCK_SIGNING_MESSAGE);
    preimage.extend_from_slice(root_chain_id);
    preimage.extend_from_slice(new_public_key);
    preimage.extend_from_slice(&crate::time::encode_secs(timestamp));
    preimage
}

/// A signed, immutable block-signing key rotation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRotationRecord {
    root_chain_id: RootChainId,
    new_public_key: [u8; PUBLIC_KEY_LENGTH],
    timestamp: u64,
    authorization_preimage: [u8; AUTHORIZATION_PREIMAGE_LENGTH],
    signature: [u8; 64],
    destination_chain: String,
}

impl KeyRotationRecord {
    pub fn version(&self) -> u8 {
        RECORD_VERSION
    }

    pub fn message(&self) -> &'static [u8] {
        BLOCK_SIGNING_MESSAGE
    }

    pub fn root_chain_id(&self) -> &RootChainId {
        &self.root_chain_id
    }

    pub fn new_public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.new_public_key
    }

    /// Return the new public key as base64.
    pub fn new_public_key_base64(&self) -> String {
        base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            self.new_public_key,
        )
    }

    /// Record timestamp in seconds since the Unix epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// `0x01` followed by the trailing half of the authorizing key's
    /// 64-byte encoding.
    pub fn authorization_preimage(&self) -> &[u8; AUTHORIZATION_PREIMAGE_LENGTH] {
        &self.authorization_preimage
    }

    /// SHA-256d of the authorization preimage, the identity key hash
    /// ledger readers match against the identity's registered keys.
    pub fn authorizing_key_hash(&self) -> [u8; 32] {
        let once = Sha256::digest(self.authorization_preimage);
        Sha256::digest(once).into()
    }

    pub fn signature(&self) -> &[u8; 64] {
        &self.signature
    }

    /// Chain the record is to be written to.
    pub fn destination_chain(&self) -> &str {
        &self.destination_chain
    }

    /// The exact bytes covered by the signature.
    pub fn signed_preimage(&self) -> Vec<u8> {
        signed_preimage(
            self.root_chain_id.as_bytes(),
            &self.new_public_key,
            self.timestamp,
        )
    }

    /// The seven ext-ids in wire order:
    /// version, message, root chain ID, new public key, timestamp,
    /// authorization preimage, signature.
    pub fn field_list(&self) -> Vec<Vec<u8>> {
        vec![
            vec![RECORD_VERSION],
            BLOCK_SIGNING_MESSAGE.to_vec(),
            self.root_chain_id.as_bytes().to_vec(),
            self.new_public_key.to_vec(),
            crate::time::encode_secs(self.timestamp).to_vec(),
            self.authorization_preimage.to_vec(),
            self.signature.to_vec(),
        ]
    }

    /// Package the record for the ledger submission collaborator.
    pub fn to_external_entry(&self) -> ExternalEntry {
        ExternalEntry::new(self.destination_chain.clone(), self.field_list())
    }

    /// Verify the signature against a known authorizing public key.
    pub fn verify(&self, authorizing_key: &VerifyingKey) -> Result<()> {
        signing::verify(authorizing_key, &self.signed_preimage(), &self.signature)
    }

    /// Verify the signature against the key carried in the authorization
    /// preimage. Under the seed ‖ public layout that key is the
    /// authorizing public key.
    pub fn verify_embedded(&self) -> Result<()> {
        let mut key_bytes = [0u8; PUBLIC_KEY_LENGTH];
        key_bytes.copy_from_slice(&self.authorization_preimage[1..]);
        let key = Ed25519KeyPair::verifying_key_from_bytes(&key_bytes)?;
        self.verify(&key)
    }
}
