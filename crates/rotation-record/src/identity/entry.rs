//! External ledger entries.
//!
//! The hand-off format for the ledger submission collaborator: a target
//! chain, a content payload and an ordered list of ext-ids.

use serde::{Deserialize, Serialize};

/// An entry ready to be embedded in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEntry {
    pub chain_id: String,
    pub content: Vec<u8>,
    pub ext_ids: Vec<Vec<u8>>,
}

impl ExternalEntry {
    /// Create an entry with empty content.
    pub fn new(chain_id: String, ext_ids: Vec<Vec<u8>>) -> Self {
        Self {
            chain_id,
            content: Vec::new(),
            ext_ids,
        }
    }

    /// Hex-encode each ext-id, preserving order.
    pub fn ext_ids_hex(&self) -> Vec<String> {
        self.ext_ids.iter().map(hex::encode).collect()
    }
}
