//! beansdb key and value hashes
//!
//! Keys are placed by `khash` (32-bit FNV-1a) and identified by `khash64`
//! (FNV-1a in the high half, murmur3 in the low half). `vhash` is the cheap
//! 16-bit value checksum used when comparing replicas.

use crate::fnv1a::get_hash_beansdb;
use crate::murmur::murmur;
use crate::{HashError, Result};

/// Keys with this prefix carry their 64-bit hash inline as hex
pub const KHASH_PREFIX: &[u8] = b"__BeansDBv2__0X";

/// Values up to this size are checksummed whole
const VHASH_WHOLE_LIMIT: usize = 1024;
/// Size of the head and tail windows checksummed for larger values
const VHASH_WINDOW: usize = 512;

/// 32-bit key hash used for bucket placement
#[must_use]
pub fn khash(key: &[u8]) -> u32 {
    get_hash_beansdb(key)
}

/// 64-bit key hash.
///
/// Keys starting with [`KHASH_PREFIX`] are decoded from the hex digits that
/// follow it (no digits gives 0, more than 16 keeps the low 64 bits).
#[must_use]
pub fn khash64(key: &[u8]) -> u64 {
    match key.strip_prefix(KHASH_PREFIX) {
        Some(rest) => parse_hex_prefix(rest),
        None => (u64::from(khash(key)) << 32) | u64::from(murmur(key)),
    }
}

fn parse_hex_prefix(digits: &[u8]) -> u64 {
    digits
        .iter()
        .map_while(|&b| char::from(b).to_digit(16))
        .fold(0u64, |acc, d| (acc << 4) | u64::from(d))
}

/// Canonical 16-digit lowercase hex form of a 64-bit key hash
#[must_use]
pub fn str_khash64(khash: u64) -> String {
    format!("{khash:016x}")
}

/// Sort key for 64-bit hashes: the low 20 bits move to the top
#[must_use]
pub fn khash_order(khash: u64) -> u64 {
    khash.rotate_right(20)
}

/// 16-bit value checksum
#[must_use]
pub fn vhash(data: &[u8]) -> u16 {
    let len = data.len();
    let mut h = (len as u32).wrapping_mul(97);
    if len <= VHASH_WHOLE_LIMIT {
        h = h.wrapping_add(khash(data));
    } else {
        h = h.wrapping_add(khash(&data[..VHASH_WINDOW]));
        h = h.wrapping_mul(97);
        h = h.wrapping_add(khash(&data[len - VHASH_WINDOW..]));
    }
    (h & 0xffff) as u16
}

/// Number of leading hex digits of `khash` that select a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketDepth(u8);

impl BucketDepth {
    /// Depth for a bucket count of 1, 16 or 256.
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidBucketCount` for any other count.
    pub fn from_bucket_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Self(0)),
            16 => Ok(Self(1)),
            256 => Ok(Self(2)),
            other => Err(HashError::InvalidBucketCount(other)),
        }
    }

    /// Hex digits used
    #[must_use]
    pub fn digits(self) -> u8 {
        self.0
    }

    /// Number of buckets at this depth
    #[must_use]
    pub fn bucket_count(self) -> u32 {
        1 << (4 * u32::from(self.0))
    }

    /// Bucket of a precomputed 32-bit key hash
    #[must_use]
    pub fn bucket_of(self, khash: u32) -> u32 {
        khash.checked_shr(32 - 4 * u32::from(self.0)).unwrap_or(0)
    }
}

/// Bucket that owns `key` at the given depth
#[must_use]
pub fn bucket_for_key(key: &[u8], depth: BucketDepth) -> u32 {
    depth.bucket_of(khash(key))
}
