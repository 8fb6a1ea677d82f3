//! Cryptographic primitives for rotation records.
//!
//! This module provides:
//! - Ed25519 key pairs in the 64-byte seed ‖ public representation
//! - Ed25519 signing and strict verification
//! - Fallible random fills from an injected entropy source

pub mod keys;
pub mod random;
pub mod signing;
