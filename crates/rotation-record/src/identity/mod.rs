//! Identity key rotation — root chain validation, record construction,
//! and packaging as an external ledger entry.

pub mod block_signing;
pub mod chain_id;
pub mod entry;

pub use block_signing::{DerivationMode, KeyRotationBuilder, KeyRotationRecord};
pub use chain_id::{RootChainId, PROOF_OF_WORK_PREFIX};
pub use entry::ExternalEntry;
