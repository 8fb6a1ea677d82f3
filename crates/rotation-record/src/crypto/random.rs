//! Secure random number generation.
//!
//! Entropy is always drawn from a caller-supplied source so that tests
//! can substitute a seeded generator. `rand::thread_rng()` is the
//! default source used by the convenience entry points.

use rand_core::{CryptoRng, RngCore};

use crate::error::{RotationError, Result};

/// Fill a buffer from a cryptographically secure source, reporting
/// source failure instead of panicking.
pub fn fill_random_with<R: RngCore + CryptoRng>(rng: &mut R, buf: &mut [u8]) -> Result<()> {
    rng.try_fill_bytes(buf)
        .map_err(|e| RotationError::GenerationFailed(format!("entropy source: {e}")))
}

/// Generate a fixed-size array of random bytes from the given source.
pub fn random_bytes_with<const N: usize, R: RngCore + CryptoRng>(rng: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    fill_random_with(rng, &mut buf)?;
    Ok(buf)
}
