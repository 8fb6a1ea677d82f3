//! Error types for rotation records.
//!
//! All errors are strongly typed and returned to the caller without
//! retries or partial records. Private key material is never included
//! in error messages.

/// Errors raised while building or checking a key rotation record.
#[derive(Debug, thiserror::Error)]
pub enum RotationError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Root chain ID invalid: {0}")]
    InvalidRootChainId(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Key generation failed: {0}")]
    GenerationFailed(String),

    #[error("Signature verification failed")]
    SignatureInvalid,
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, RotationError>;
