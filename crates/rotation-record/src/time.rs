//! Time utilities for rotation records.
//!
//! Record timestamps are whole seconds since the Unix epoch.

/// Return the current wall-clock time truncated to whole seconds.
///
/// A clock set before the epoch reads as zero.
pub fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Encode a seconds timestamp the way it is carried on the wire.
pub fn encode_secs(secs: u64) -> [u8; 8] {
    secs.to_be_bytes()
}

/// Convert seconds to an RFC 3339 string, or `None` if chrono cannot
/// represent the instant.
pub fn secs_to_rfc3339(secs: u64) -> Option<String> {
    let secs = i64::try_from(secs).ok()?;
    chrono::DateTime::from_timestamp(secs, 0).map(|dt| dt.to_rfc3339())
}
