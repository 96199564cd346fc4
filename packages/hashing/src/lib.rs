//! FNV-1a 32-bit key hashing for sharded beansdb stores
//!
//! The core lives in [`fnv1a`]: one unsigned routine behind the three
//! historical entry points `get_hash`, `get_hash_bugfree` and
//! `get_hash_beansdb`. Around it sit the host entry-point table, the beansdb
//! key hashes and bucket routing, and the async builder API.

#![forbid(unsafe_code)]

pub mod api;
pub mod async_result;
pub mod entry;
pub mod error;
pub mod fnv1a;
pub mod hash_result;
pub mod khash;
pub mod murmur;
pub mod route;
pub mod streaming;

pub use error::{HashError, Result};

pub use fnv1a::{
    fnv1a32, fnv1a32_with, get_hash, get_hash_beansdb, get_hash_bugfree, ByteWidening, Fnv1a,
    Fnv1aBuildHasher, Fnv1aHasher, LengthPolicy, Variant, FNV_32_INIT, FNV_32_PRIME,
};

pub use entry::{call_entry_point, entry_point, EntryPoint, ENTRY_POINTS};
pub use khash::{
    bucket_for_key, khash, khash64, khash_order, str_khash64, vhash, BucketDepth, KHASH_PREFIX,
};
pub use route::{NodeBuckets, Route, RouteConfig};

pub use api::{Fnv1aBuilder, Hash};

pub use async_result::{AsyncHashResult, AsyncHashResultWithError, AsyncHashResultWithHandler};
pub use hash_result::HashResult;

pub use khash_common::{on_error, on_result};

/// Main entry point
pub struct Khash;

impl Khash {
    /// Master builder for hash operations
    #[must_use]
    pub fn hash() -> HashMasterBuilder {
        HashMasterBuilder
    }
}

/// Master builder for hash operations
pub struct HashMasterBuilder;

impl HashMasterBuilder {
    /// FNV-1a, full length
    #[must_use]
    pub fn fnv1a(self) -> Fnv1aBuilder {
        Hash::fnv1a()
    }

    /// FNV-1a truncating at the first zero byte
    #[must_use]
    pub fn fnv1a_legacy(self) -> Fnv1aBuilder {
        Hash::fnv1a_legacy()
    }

    /// FNV-1a as used for beansdb keys
    #[must_use]
    pub fn fnv1a_beansdb(self) -> Fnv1aBuilder {
        Hash::fnv1a_beansdb()
    }
}
