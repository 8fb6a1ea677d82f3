//! Identity root chain identifiers.
//!
//! A root chain ID is a 32-byte ledger chain identifier whose leading
//! bytes carry the proof-of-work tag shared with identity chain creation.

use serde::{Deserialize, Serialize};

use crate::error::{RotationError, Result};

/// Tag every identity root chain ID starts with (`888888` in hex).
pub const PROOF_OF_WORK_PREFIX: [u8; 3] = [0x88, 0x88, 0x88];

/// Number of leading bytes compared against [`PROOF_OF_WORK_PREFIX`].
pub const PROOF_OF_WORK_LENGTH: usize = PROOF_OF_WORK_PREFIX.len();

/// Length of a decoded chain ID.
pub const CHAIN_ID_LENGTH: usize = 32;

/// A validated identity root chain ID.
///
/// Keeps the hex text it was parsed from: deterministic key derivation
/// is keyed on that text, not on the decoded bytes. Serializes as that
/// text and deserializes through [`RootChainId::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootChainId {
    hex: String,
    bytes: [u8; CHAIN_ID_LENGTH],
}

impl RootChainId {
    /// Decode and validate a hex root chain ID.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let decoded = hex::decode(hex_str)?;
        if decoded.len() < PROOF_OF_WORK_LENGTH
            || decoded[..PROOF_OF_WORK_LENGTH] != PROOF_OF_WORK_PREFIX
        {
            return Err(RotationError::InvalidRootChainId(
                "missing proof-of-work prefix".into(),
            ));
        }
        let bytes: [u8; CHAIN_ID_LENGTH] = decoded.try_into().map_err(|v: Vec<u8>| {
            RotationError::InvalidRootChainId(format!(
                "expected {CHAIN_ID_LENGTH} bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self {
            hex: hex_str.to_string(),
            bytes,
        })
    }

    /// Return the decoded chain ID.
    pub fn as_bytes(&self) -> &[u8; CHAIN_ID_LENGTH] {
        &self.bytes
    }

    /// Return the hex text as supplied by the caller.
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// Seed for deterministic key derivation: the first 32 bytes of the
    /// hex text. Upper- and lower-case spellings yield different seeds.
    pub fn deterministic_seed(&self) -> [u8; 32] {
        let mut seed = [0u8; 32];
        for (dst, src) in seed.iter_mut().zip(self.hex.as_bytes()) {
            *dst = *src;
        }
        seed
    }
}

impl TryFrom<String> for RootChainId {
    type Error = RotationError;

    fn try_from(hex_str: String) -> Result<Self> {
        Self::from_hex(&hex_str)
    }
}

impl From<RootChainId> for String {
    fn from(id: RootChainId) -> Self {
        id.hex
    }
}

impl std::fmt::Display for RootChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex)
    }
}
