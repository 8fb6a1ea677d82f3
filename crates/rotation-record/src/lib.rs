//! RotationRecord — signed block-signing key rotations for identity root chains.
//!
//! Builds the record an identity writes to its chain to activate a new
//! block-signing key: the new public key bound to the identity's root
//! chain ID and a timestamp, signed by the identity's current key, and
//! packed as the seven ext-ids of an external ledger entry.

pub mod crypto;
pub mod error;
pub mod identity;
pub mod time;

// Re-export primary types
pub use error::{Result, RotationError};
pub use identity::{
    DerivationMode, ExternalEntry, KeyRotationBuilder, KeyRotationRecord, RootChainId,
};
