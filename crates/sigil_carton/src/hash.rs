//! Hashing utilities using xxHash3.
//!
//! Provides the digest used to mint directive identifiers and a source of
//! per-call entropy to mix into it.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};
use xxhash_rust::xxh3::Xxh3;

/// Compute a 128-bit digest over several byte slices, fed in order.
///
/// Not cryptographic. Collision resistance here only has to separate
/// identifiers minted from distinct inputs.
pub fn digest_128(parts: &[&[u8]]) -> u128 {
    let mut hasher = Xxh3::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.digest128()
}

/// Convert a 128-bit digest to a hex string (32 characters).
#[inline]
pub fn digest_to_hex(digest: u128) -> String {
    format!("{:032x}", digest)
}

/// Nanoseconds since the Unix epoch, or 0 when the clock is before it.
#[inline]
pub fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

/// Draw 64 random bits from the operating system.
///
/// Falls back to the randomly keyed std hasher when the OS source is
/// unavailable, which is still unpredictable per process.
pub fn entropy_u64() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::fill(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => {
            let mut hasher = RandomState::new().build_hasher();
            hasher.write_u128(unix_nanos());
            hasher.finish()
        }
    }
}
